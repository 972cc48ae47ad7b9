//! Postgres-backed [`StoreRepository`] over the `stores` table and its children.

use chrono::{DateTime, Utc};
use shopinsight_core::{FaqEntry, Product, StoreRecord};
use sqlx::{PgPool, Postgres, Transaction};

use crate::repository::{StoreId, StoreRepository};
use crate::DbError;

const UNIQUE_VIOLATION: &str = "23505";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `stores` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreRow {
    pub id: i64,
    pub brand_name: Option<String>,
    pub website_url: String,
    pub privacy_policy: Option<String>,
    pub return_policy: Option<String>,
    pub refund_policy: Option<String>,
    pub about_brand: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A row from `products` or `hero_products`; both share one shape.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            title: row.title,
            url: row.url,
            price: row.price,
            image: row.image,
            description: row.description,
        }
    }
}

#[derive(Clone, Copy)]
enum ProductTable {
    Catalog,
    Hero,
}

impl ProductTable {
    fn name(self) -> &'static str {
        match self {
            ProductTable::Catalog => "products",
            ProductTable::Hero => "hero_products",
        }
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StoreRepository for PgStoreRepository {
    /// Replaces the stored record for `record.website_url` in one transaction.
    ///
    /// A transaction-scoped advisory lock on the URL serializes concurrent
    /// saves of the same site. Products are upserted by ID, so a product
    /// previously owned by another store moves to this one.
    async fn save(&self, record: &StoreRecord) -> Result<StoreId, DbError> {
        let mut record = record.clone();
        record.normalize();
        let website_url = record.website_url.as_str();

        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(website_url)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM stores WHERE website_url = $1")
            .bind(website_url)
            .execute(&mut *tx)
            .await?;

        let store_id: StoreId = sqlx::query_scalar(
            "INSERT INTO stores \
               (brand_name, website_url, privacy_policy, return_policy, refund_policy, about_brand) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&record.brand_name)
        .bind(website_url)
        .bind(&record.privacy_policy)
        .bind(&record.return_policy)
        .bind(&record.refund_policy)
        .bind(&record.about_brand)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, website_url))?;

        upsert_products(&mut tx, ProductTable::Catalog, store_id, &record.product_catalog).await?;
        upsert_products(&mut tx, ProductTable::Hero, store_id, &record.hero_products).await?;

        for (position, entry) in positioned(&record.faq) {
            sqlx::query(
                "INSERT INTO faqs (store_id, position, question, answer) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (store_id, question, answer) DO NOTHING",
            )
            .bind(store_id)
            .bind(position)
            .bind(&entry.question)
            .bind(&entry.answer)
            .execute(&mut *tx)
            .await?;
        }

        insert_values(&mut tx, "social_handles", "handle", store_id, &record.social_handles)
            .await?;
        insert_values(&mut tx, "contact_details", "detail", store_id, &record.contact_details)
            .await?;
        insert_values(&mut tx, "important_links", "link", store_id, &record.important_links)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            store_id,
            website_url,
            products = record.product_catalog.len(),
            hero_products = record.hero_products.len(),
            "store saved"
        );
        Ok(store_id)
    }

    /// Reads the store and its children from one `REPEATABLE READ` snapshot,
    /// so a concurrent replacement is either fully visible or not at all.
    async fn load(&self, website_url: &str) -> Result<Option<StoreRecord>, DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let Some(store) = fetch_store(&mut tx, website_url).await? else {
            tx.commit().await?;
            return Ok(None);
        };

        let mut record = StoreRecord::new(store.website_url);
        record.brand_name = store.brand_name;
        record.privacy_policy = store.privacy_policy;
        record.return_policy = store.return_policy;
        record.refund_policy = store.refund_policy;
        record.about_brand = store.about_brand;
        record.product_catalog = list_products(&mut tx, ProductTable::Catalog, store.id).await?;
        record.hero_products = list_products(&mut tx, ProductTable::Hero, store.id).await?;
        record.faq = list_faqs(&mut tx, store.id).await?;
        record.social_handles = list_values(&mut tx, "social_handles", "handle", store.id).await?;
        record.contact_details = list_values(&mut tx, "contact_details", "detail", store.id).await?;
        record.important_links = list_values(&mut tx, "important_links", "link", store.id).await?;
        tx.commit().await?;

        // Only successful extractions are ever saved.
        record.success = true;

        Ok(Some(record))
    }

    async fn health_check(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await
    }
}

async fn fetch_store(
    tx: &mut Transaction<'_, Postgres>,
    website_url: &str,
) -> Result<Option<StoreRow>, DbError> {
    let row = sqlx::query_as::<_, StoreRow>(
        "SELECT id, brand_name, website_url, privacy_policy, return_policy, refund_policy, \
                about_brand, created_at \
         FROM stores \
         WHERE website_url = $1",
    )
    .bind(website_url)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row)
}

async fn list_products(
    tx: &mut Transaction<'_, Postgres>,
    table: ProductTable,
    store_id: StoreId,
) -> Result<Vec<Product>, DbError> {
    let sql = format!(
        "SELECT id, title, url, price, image, description \
         FROM {} \
         WHERE store_id = $1 \
         ORDER BY position",
        table.name()
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(store_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

async fn list_values(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    column: &str,
    store_id: StoreId,
) -> Result<Vec<String>, DbError> {
    let sql = format!("SELECT {column} FROM {table} WHERE store_id = $1 ORDER BY position");
    let values = sqlx::query_scalar::<_, String>(&sql)
        .bind(store_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(values)
}

async fn list_faqs(
    tx: &mut Transaction<'_, Postgres>,
    store_id: StoreId,
) -> Result<Vec<FaqEntry>, DbError> {
    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT question, answer FROM faqs WHERE store_id = $1 ORDER BY position",
    )
    .bind(store_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(question, answer)| FaqEntry { question, answer })
        .collect())
}

async fn upsert_products(
    tx: &mut Transaction<'_, Postgres>,
    table: ProductTable,
    store_id: StoreId,
    products: &[Product],
) -> Result<(), DbError> {
    let sql = format!(
        "INSERT INTO {} (id, store_id, position, title, url, price, image, description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (id) DO UPDATE SET \
             store_id = EXCLUDED.store_id, \
             position = EXCLUDED.position, \
             title = EXCLUDED.title, \
             url = EXCLUDED.url, \
             price = EXCLUDED.price, \
             image = EXCLUDED.image, \
             description = EXCLUDED.description",
        table.name()
    );

    for (position, product) in upsert_order(products) {
        sqlx::query(&sql)
            .bind(&product.id)
            .bind(store_id)
            .bind(position)
            .bind(&product.title)
            .bind(&product.url)
            .bind(&product.price)
            .bind(&product.image)
            .bind(&product.description)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn insert_values(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    column: &str,
    store_id: StoreId,
    values: &[String],
) -> Result<(), DbError> {
    let sql = format!(
        "INSERT INTO {table} (store_id, position, {column}) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (store_id, {column}) DO NOTHING"
    );
    for (position, value) in positioned(values) {
        sqlx::query(&sql)
            .bind(store_id)
            .bind(position)
            .bind(value)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Pairs each item with its list position as stored in the `position` column.
fn positioned<T>(items: &[T]) -> impl Iterator<Item = (i32, &T)> {
    (0..).zip(items)
}

/// Products with their list positions, sorted by ID. Every save takes row
/// locks in the same order, so saves of different sites sharing product IDs
/// cannot deadlock.
fn upsert_order(products: &[Product]) -> Vec<(i32, &Product)> {
    let mut ordered: Vec<_> = positioned(products).collect();
    ordered.sort_by(|(_, a), (_, b)| a.id.cmp(&b.id));
    ordered
}

fn map_unique_violation(e: sqlx::Error, website_url: &str) -> DbError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return DbError::Conflict {
                website_url: website_url.to_owned(),
            };
        }
    }
    DbError::Sqlx(e)
}
