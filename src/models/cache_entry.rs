use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Cache row as read from the database.
/// `cached_at` is stored as naive UTC.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::cache_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CacheEntry {
    pub namespace: String,
    pub cache_key: String,
    pub data: String,
    pub cached_at: NaiveDateTime,
}

/// Row written by `REPLACE INTO`.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::cache_entries)]
pub struct NewCacheEntry<'a> {
    pub namespace: &'a str,
    pub cache_key: &'a str,
    pub data: String,
    pub cached_at: NaiveDateTime,
}
