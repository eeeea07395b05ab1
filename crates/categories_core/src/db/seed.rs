//! Fixture seeding for fresh stores.

use super::DbResult;
use crate::model::category::default_categories;
use log::info;
use rusqlite::{params, Connection};

/// Inserts the html/css/js fixture categories, skipping any whose slug is
/// already present. Ids come from the store, so a fresh store gets 1, 2, 3.
///
/// Returns how many rows were inserted. Safe to call repeatedly. Must not be
/// called while another transaction is open on `conn`.
pub fn seed_default_categories(conn: &Connection) -> DbResult<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO categories (title, slug)
             SELECT ?1, ?2
             WHERE NOT EXISTS (SELECT 1 FROM categories WHERE slug = ?2);",
        )?;
        for category in default_categories() {
            inserted += stmt.execute(params![category.title, category.slug])?;
        }
    }
    tx.commit()?;

    info!("event=db_seed module=db status=ok inserted={inserted}");
    Ok(inserted)
}
