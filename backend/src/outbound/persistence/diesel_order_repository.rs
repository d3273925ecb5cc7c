//! PostgreSQL-backed `OrderRepository` implementation using Diesel.
//!
//! Checkout runs as a single transaction: the referenced product rows are
//! locked with `FOR UPDATE` in ascending id order (stable lock order avoids
//! deadlocks between concurrent checkouts), the cart is priced against the
//! locked stock, and only then are the order rows written and the stock
//! decremented. Any failure rolls the whole transaction back.

use std::collections::HashMap;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use pagination::{Page, PageParams};

use crate::domain::analytics::{DateRange, SalesItem, SalesOrder};
use crate::domain::checkout::{price_cart, CheckoutRejection};
use crate::domain::order::{Order, OrderFilter, OrderItem, OrderStatus};
use crate::domain::ports::{CheckoutError, OrderRepository, OrderRepositoryError};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{
    CartItemRow, NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow, ProductRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{cart_items, order_items, orders, products};

/// Diesel-backed implementation of the order repository port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> OrderRepositoryError {
    map_pool_error(error, OrderRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> OrderRepositoryError {
    map_diesel_error(
        error,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

fn parse_status(raw: &str) -> Result<OrderStatus, OrderRepositoryError> {
    raw.parse()
        .map_err(|_| OrderRepositoryError::query(format!("unknown stored status: {raw}")))
}

/// Assemble a domain order from its row and already-loaded items.
fn row_to_order(row: OrderRow, items: Vec<OrderItem>) -> Result<Order, OrderRepositoryError> {
    Ok(Order {
        id: row.id,
        user_id: row.user_id,
        total_amount: row.total_amount,
        shipping_address: row.shipping_address,
        status: parse_status(&row.status)?,
        created_at: row.created_at,
        items,
    })
}

/// Internal checkout transaction error; rollback needs `From<diesel::Error>`.
#[derive(Debug)]
enum TxError {
    Rejected(CheckoutRejection),
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<CheckoutRejection> for TxError {
    fn from(rejection: CheckoutRejection) -> Self {
        Self::Rejected(rejection)
    }
}

type BoxedOrders<'a> = diesel::dsl::IntoBoxed<'a, orders::table, Pg>;

fn filtered_orders(filter: OrderFilter) -> BoxedOrders<'static> {
    let mut query = orders::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(orders::status.eq(status.as_str()));
    }
    query
}

/// Load and group the items for a set of orders, with product names.
async fn load_items(
    conn: &mut AsyncPgConnection,
    order_ids: &[i32],
) -> Result<HashMap<i32, Vec<OrderItem>>, diesel::result::Error> {
    let rows: Vec<(OrderItemRow, Option<String>)> = order_items::table
        .left_join(products::table)
        .filter(order_items::order_id.eq_any(order_ids))
        .order(order_items::id.asc())
        .select((OrderItemRow::as_select(), products::name.nullable()))
        .load(conn)
        .await?;

    let mut grouped: HashMap<i32, Vec<OrderItem>> = HashMap::new();
    for (row, product_name) in rows {
        grouped.entry(row.order_id).or_default().push(OrderItem {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            product_name,
            quantity: row.quantity,
            price: row.price,
        });
    }
    Ok(grouped)
}

/// Attach items to order rows, preserving row order.
fn assemble_orders(
    rows: Vec<OrderRow>,
    mut items: HashMap<i32, Vec<OrderItem>>,
) -> Result<Vec<Order>, OrderRepositoryError> {
    rows.into_iter()
        .map(|row| {
            let order_items = items.remove(&row.id).unwrap_or_default();
            row_to_order(row, order_items)
        })
        .collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn place_order(
        &self,
        user_id: i32,
        shipping_address: &str,
    ) -> Result<Order, CheckoutError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CheckoutError::Repository(map_pool(err)))?;
        let shipping_address = shipping_address.to_owned();

        let result = conn
            .transaction::<Order, TxError, _>(|conn| {
                async move {
                    let cart_rows: Vec<CartItemRow> = cart_items::table
                        .filter(cart_items::user_id.eq(user_id))
                        .order(cart_items::id.asc())
                        .select(CartItemRow::as_select())
                        .load(conn)
                        .await?;

                    // Lock product rows in ascending id order.
                    let mut product_ids: Vec<i32> =
                        cart_rows.iter().map(|row| row.product_id).collect();
                    product_ids.sort_unstable();
                    product_ids.dedup();
                    let locked: Vec<ProductRow> = products::table
                        .filter(products::id.eq_any(&product_ids))
                        .order(products::id.asc())
                        .for_update()
                        .select(ProductRow::as_select())
                        .load(conn)
                        .await?;
                    let by_id: HashMap<i32, ProductRow> =
                        locked.into_iter().map(|row| (row.id, row)).collect();

                    let lines: Vec<_> = cart_rows
                        .into_iter()
                        .map(|row| {
                            let product = by_id.get(&row.product_id).cloned();
                            row.into_cart_line(product)
                        })
                        .collect();
                    let priced = price_cart(&lines)?;

                    let order_row: OrderRow = diesel::insert_into(orders::table)
                        .values(&NewOrderRow {
                            user_id,
                            total_amount: &priced.total_amount,
                            shipping_address: &shipping_address,
                            status: OrderStatus::Pending.as_str(),
                        })
                        .returning(OrderRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let item_rows: Vec<NewOrderItemRow<'_>> = priced
                        .lines
                        .iter()
                        .map(|line| NewOrderItemRow {
                            order_id: order_row.id,
                            product_id: line.product_id,
                            quantity: line.quantity,
                            price: &line.unit_price,
                        })
                        .collect();
                    let inserted: Vec<OrderItemRow> = diesel::insert_into(order_items::table)
                        .values(&item_rows)
                        .returning(OrderItemRow::as_returning())
                        .get_results(conn)
                        .await?;

                    for line in &priced.lines {
                        diesel::update(products::table.find(line.product_id))
                            .set((
                                products::stock_quantity
                                    .eq(products::stock_quantity - line.quantity),
                                products::updated_at.eq(Utc::now()),
                            ))
                            .execute(conn)
                            .await?;
                    }

                    diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id)))
                        .execute(conn)
                        .await?;

                    let items = inserted
                        .into_iter()
                        .map(|row| OrderItem {
                            id: row.id,
                            order_id: row.order_id,
                            product_id: row.product_id,
                            product_name: by_id.get(&row.product_id).map(|p| p.name.clone()),
                            quantity: row.quantity,
                            price: row.price,
                        })
                        .collect();

                    Ok(Order {
                        id: order_row.id,
                        user_id: order_row.user_id,
                        total_amount: order_row.total_amount,
                        shipping_address: order_row.shipping_address,
                        status: OrderStatus::Pending,
                        created_at: order_row.created_at,
                        items,
                    })
                }
                .scope_boxed()
            })
            .await;

        result.map_err(|err| match err {
            TxError::Rejected(rejection) => CheckoutError::Rejected(rejection),
            TxError::Diesel(error) => CheckoutError::Repository(map_diesel(error)),
        })
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<OrderRow> = orders::table
            .filter(orders::user_id.eq(user_id))
            .order((orders::created_at.desc(), orders::id.desc()))
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let order_ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let items = load_items(&mut conn, &order_ids).await.map_err(map_diesel)?;
        assemble_orders(rows, items)
    }

    async fn find_for_user(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<OrderRow> = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut items = load_items(&mut conn, &[row.id]).await.map_err(map_diesel)?;
        let order_items = items.remove(&row.id).unwrap_or_default();
        row_to_order(row, order_items).map(Some)
    }

    async fn list_all(
        &self,
        filter: OrderFilter,
        page: PageParams,
    ) -> Result<Page<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let total: i64 = filtered_orders(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let rows: Vec<OrderRow> = filtered_orders(filter)
            .order((orders::created_at.desc(), orders::id.desc()))
            .offset(page.offset())
            .limit(page.limit())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let order_ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let items = load_items(&mut conn, &order_ids).await.map_err(map_diesel)?;
        let assembled = assemble_orders(rows, items)?;
        Ok(Page::new(assembled, total, &page))
    }

    async fn find_by_id(&self, order_id: i32) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<OrderRow> = orders::table
            .find(order_id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut items = load_items(&mut conn, &[row.id]).await.map_err(map_diesel)?;
        let order_items = items.remove(&row.id).unwrap_or_default();
        row_to_order(row, order_items).map(Some)
    }

    async fn set_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<OrderRow> = diesel::update(orders::table.find(order_id))
            .set(orders::status.eq(status.as_str()))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut items = load_items(&mut conn, &[row.id]).await.map_err(map_diesel)?;
        let order_items = items.remove(&row.id).unwrap_or_default();
        row_to_order(row, order_items).map(Some)
    }

    async fn load_sales(
        &self,
        range: DateRange,
    ) -> Result<(Vec<SalesOrder>, Vec<SalesItem>), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut orders_query = orders::table.into_boxed();
        if let Some(start) = range.start {
            orders_query = orders_query.filter(orders::created_at.ge(start));
        }
        if let Some(end) = range.end {
            orders_query = orders_query.filter(orders::created_at.le(end));
        }
        let order_rows: Vec<(String, BigDecimal)> = orders_query
            .select((orders::status, orders::total_amount))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let sales_orders = order_rows
            .into_iter()
            .map(|(status, total_amount)| {
                Ok(SalesOrder {
                    status: parse_status(&status)?,
                    total_amount,
                })
            })
            .collect::<Result<Vec<_>, OrderRepositoryError>>()?;

        let mut items_query = order_items::table
            .inner_join(orders::table)
            .left_join(products::table)
            .into_boxed();
        if let Some(start) = range.start {
            items_query = items_query.filter(orders::created_at.ge(start));
        }
        if let Some(end) = range.end {
            items_query = items_query.filter(orders::created_at.le(end));
        }
        let item_rows: Vec<(i32, Option<String>, i32, BigDecimal)> = items_query
            .order(order_items::id.asc())
            .select((
                order_items::product_id,
                products::name.nullable(),
                order_items::quantity,
                order_items::price,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let sales_items = item_rows
            .into_iter()
            .map(|(product_id, product_name, quantity, price)| SalesItem {
                product_id,
                product_name,
                quantity,
                price,
            })
            .collect();

        Ok((sales_orders, sales_items))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and order assembly.
    use rstest::rstest;

    use super::*;

    fn order_row(id: i32, status: &str) -> OrderRow {
        OrderRow {
            id,
            user_id: 1,
            total_amount: "30.00".parse().expect("valid decimal"),
            shipping_address: "1 High Street".into(),
            status: status.into(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool(PoolError::checkout("connection refused"));
        assert!(matches!(error, OrderRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn stored_status_round_trips_into_domain() {
        let order = row_to_order(order_row(5, "shipped"), Vec::new()).expect("valid status");
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[rstest]
    fn corrupt_stored_status_is_a_query_error() {
        let error = row_to_order(order_row(5, "mislaid"), Vec::new()).expect_err("bad status");
        assert!(matches!(error, OrderRepositoryError::Query { .. }));
        assert!(error.to_string().contains("mislaid"));
    }

    #[rstest]
    fn assembly_attaches_items_to_their_orders() {
        let rows = vec![order_row(1, "pending"), order_row(2, "pending")];
        let mut items = HashMap::new();
        items.insert(
            2,
            vec![OrderItem {
                id: 9,
                order_id: 2,
                product_id: 7,
                product_name: Some("Widget".into()),
                quantity: 1,
                price: "10.00".parse().expect("valid decimal"),
            }],
        );
        let orders = assemble_orders(rows, items).expect("assembles");
        assert!(orders[0].items.is_empty());
        assert_eq!(orders[1].items.len(), 1);
    }
}
