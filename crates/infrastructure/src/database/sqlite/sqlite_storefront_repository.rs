use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sentinel_core::{
    models::{NewProduct, Order, OrderItem, OrderStatus, Product},
    traits::StorefrontRepository,
    SentinelError, SentinelResult,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

pub struct SqliteStorefrontRepository {
    pool: SqlitePool,
}

impl SqliteStorefrontRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &SqliteRow) -> SentinelResult<Product> {
        Ok(Product {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            image: row.try_get("image")?,
            stock: row.try_get("stock")?,
        })
    }
}

#[async_trait]
impl StorefrontRepository for SqliteStorefrontRepository {
    async fn list_products(&self) -> SentinelResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price, image, stock FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        rows.iter().map(Self::row_to_product).collect()
    }

    async fn get_product(&self, id: i64) -> SentinelResult<Option<Product>> {
        let row = sqlx::query(
            "SELECT id, name, description, price, image, stock FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn create_product(&self, product: &NewProduct) -> SentinelResult<Product> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, image, stock)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.stock)
        .execute(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        Ok(Product::from_new(result.last_insert_rowid(), product))
    }

    async fn create_order(
        &self,
        items: &[OrderItem],
        created_at: DateTime<Utc>,
    ) -> SentinelResult<Order> {
        let total = Order::total_for(items);
        let status = OrderStatus::Completed;

        let result = sqlx::query("INSERT INTO orders (total, status, created_at) VALUES ($1, $2, $3)")
            .bind(total)
            .bind(status.as_str())
            .bind(created_at.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(SentinelError::Database)?;

        let id = result.last_insert_rowid();
        debug!("创建订单成功: id={} total={}", id, total);
        Ok(Order {
            id,
            total,
            status,
            created_at,
        })
    }
}
