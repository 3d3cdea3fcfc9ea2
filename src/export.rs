//! CSV export of orders for the admin back-office.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    models::{Order, Product},
    pricing::{AmountOverflow, format_amount},
};

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

pub const HEADER: [&str; 14] = [
    "Order ID",
    "Date",
    "Customer ID",
    "Product Name",
    "Variant ID",
    "Quantity",
    "Unit Price",
    "Subtotal",
    "Total Amount",
    "Discount",
    "Final Amount",
    "Status",
    "Payment Method",
    "Payment Status",
];

const UNKNOWN_PRODUCT: &str = "Unknown";
const DEFAULT_PAYMENT_METHOD: &str = "Cash on Delivery";
const DEFAULT_PAYMENT_STATUS: &str = "Pending";

/// One row per order line. Order-level columns are only filled on the first
/// line of each order; later lines leave them blank.
pub fn order_rows(
    orders: &[Order],
    products: &[Product],
) -> Result<Vec<[String; 14]>, AmountOverflow> {
    let names: HashMap<u64, &str> = products.iter().map(|p| (p.id, p.name.as_str())).collect();

    let mut rows = Vec::new();
    for order in orders {
        for (index, item) in order.products.iter().enumerate() {
            let product_name = names
                .get(&item.product_id)
                .copied()
                .unwrap_or(UNKNOWN_PRODUCT);
            let subtotal = item
                .price
                .checked_mul(Decimal::from(item.quantity))
                .ok_or(AmountOverflow)?;
            let line = [
                product_name.to_string(),
                item.variant_id.map(|id| id.to_string()).unwrap_or_default(),
                item.quantity.to_string(),
                format_amount(item.price),
                format_amount(subtotal),
            ];

            let order_cells = if index == 0 {
                order_level_cells(order)?
            } else {
                Default::default()
            };

            let [id, date, customer, total, discount, final_amount, status, method, payment] =
                order_cells;
            let [name, variant, quantity, unit_price, subtotal] = line;
            rows.push([
                id,
                date,
                customer,
                name,
                variant,
                quantity,
                unit_price,
                subtotal,
                total,
                discount,
                final_amount,
                status,
                method,
                payment,
            ]);
        }
    }
    Ok(rows)
}

fn order_level_cells(order: &Order) -> Result<[String; 9], AmountOverflow> {
    let discount = match order.discounted_amount {
        Some(discounted) => order
            .total_amount
            .checked_sub(discounted)
            .ok_or(AmountOverflow)?,
        None => Decimal::ZERO,
    };
    let final_amount = order.discounted_amount.unwrap_or(order.total_amount);

    Ok([
        order.id.to_string(),
        order.order_date.format("%Y-%m-%d %H:%M:%S").to_string(),
        order.customer_id.to_string(),
        format_amount(order.total_amount),
        format_amount(discount),
        format_amount(final_amount),
        order.status.as_str().to_string(),
        order
            .payment_method
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        order
            .payment_status
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
    ])
}

/// Full CSV document: quoted cells, `\n` between rows, header first.
pub fn orders_to_csv(orders: &[Order], products: &[Product]) -> Result<String, AmountOverflow> {
    let header = HEADER.map(str::to_string);
    let csv = std::iter::once(header)
        .chain(order_rows(orders, products)?)
        .map(|row| row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(csv)
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("orders_{}.csv", date.format("%Y-%m-%d"))
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
