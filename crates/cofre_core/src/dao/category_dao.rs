//! Category DAO contract and SQLite implementation.

use crate::conn::{ConnResult, FromRow, Row, TransactedConnection};
use crate::dao::{in_placeholders, Dao, MAX_BIND_PARAMS};
use crate::model::category::{CategoryKey, CategoryName};
use crate::model::secret::SecretKey;
use rusqlite::{params_from_iter, ToSql};

const CATEGORY_SELECT_SQL: &str = "SELECT pk_category, name FROM category";

/// Persisted `category` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub pk_category: i64,
    pub name: String,
}

impl CategoryRecord {
    pub fn new(pk_category: i64, name: impl Into<String>) -> Self {
        Self {
            pk_category,
            name: name.into(),
        }
    }

    pub fn key(&self) -> CategoryKey {
        CategoryKey(self.pk_category)
    }
}

impl FromRow for CategoryRecord {
    const FIELDS: &'static [&'static str] = &["pk_category", "name"];

    fn from_row(row: &Row) -> ConnResult<Self> {
        Ok(Self {
            pk_category: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

/// `category` row before insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategoryRecord {
    pub name: String,
}

impl NewCategoryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Category-specific reads on top of the generic [`Dao`] contract.
pub trait CategoryDao:
    Dao<
    Key = CategoryKey,
    NaturalKey = CategoryName,
    Record = CategoryRecord,
    NewRecord = NewCategoryRecord,
>
{
    /// Categories linked to one secret, ordered by key.
    fn list_by_secret(&self, secret: SecretKey) -> ConnResult<Vec<CategoryRecord>>;
}

/// SQLite-backed category DAO.
pub struct SqliteCategoryDao<'conn> {
    conn: &'conn TransactedConnection,
}

impl<'conn> SqliteCategoryDao<'conn> {
    pub fn new(conn: &'conn TransactedConnection) -> Self {
        Self { conn }
    }

    /// Records whose `column` matches any of `values`, by ascending key.
    ///
    /// Runs one `IN (...)` query per [`MAX_BIND_PARAMS`] values and merges
    /// the batches, so a record hit from two batches is returned once.
    fn list_where_in<V: ToSql>(
        &self,
        column: &str,
        values: &[V],
    ) -> ConnResult<Vec<CategoryRecord>> {
        let mut records = Vec::new();
        for batch in values.chunks(MAX_BIND_PARAMS) {
            self.conn.execute(
                &format!(
                    "{CATEGORY_SELECT_SQL} WHERE {column} IN ({}) ORDER BY pk_category;",
                    in_placeholders(batch.len())
                ),
                params_from_iter(batch),
            )?;
            records.extend(self.conn.fetch_all_as::<CategoryRecord>()?);
        }
        if values.len() > MAX_BIND_PARAMS {
            records.sort_by_key(|record| record.pk_category);
            records.dedup_by_key(|record| record.pk_category);
        }
        Ok(records)
    }
}

impl Dao for SqliteCategoryDao<'_> {
    type Key = CategoryKey;
    type NaturalKey = CategoryName;
    type Record = CategoryRecord;
    type NewRecord = NewCategoryRecord;

    fn create(&self, data: &NewCategoryRecord) -> ConnResult<CategoryKey> {
        self.conn.execute(
            "INSERT INTO category (name) VALUES (?1);",
            [data.name.as_str()],
        )?;
        Ok(CategoryKey(self.conn.last_insert_key()?))
    }

    fn fetch_by_key(&self, key: &CategoryKey) -> ConnResult<Option<CategoryRecord>> {
        self.conn.execute(
            &format!("{CATEGORY_SELECT_SQL} WHERE pk_category = ?1;"),
            [key.0],
        )?;
        self.conn.fetch_one_as()
    }

    fn fetch_by_natural_key(&self, name: &CategoryName) -> ConnResult<Option<CategoryRecord>> {
        self.conn.execute(
            &format!("{CATEGORY_SELECT_SQL} WHERE name = ?1;"),
            [name.as_str()],
        )?;
        self.conn.fetch_one_as()
    }

    fn list_by_keys(&self, keys: &[CategoryKey]) -> ConnResult<Vec<CategoryRecord>> {
        let keys = keys.iter().map(|key| key.0).collect::<Vec<_>>();
        self.list_where_in("pk_category", &keys)
    }

    fn list_by_natural_keys(&self, names: &[CategoryName]) -> ConnResult<Vec<CategoryRecord>> {
        let names = names.iter().map(CategoryName::as_str).collect::<Vec<_>>();
        self.list_where_in("name", &names)
    }

    fn list_all(&self) -> ConnResult<Vec<CategoryRecord>> {
        self.conn
            .execute(&format!("{CATEGORY_SELECT_SQL} ORDER BY pk_category;"), [])?;
        self.conn.fetch_all_as()
    }

    fn delete_by_key(&self, key: &CategoryKey) -> ConnResult<()> {
        self.conn
            .execute("DELETE FROM category WHERE pk_category = ?1;", [key.0])?;
        Ok(())
    }

    fn save_with_key(&self, record: &CategoryRecord) -> ConnResult<()> {
        self.conn.execute(
            "UPDATE category SET name = ?2 WHERE pk_category = ?1;",
            (record.pk_category, record.name.as_str()),
        )?;
        Ok(())
    }
}

impl CategoryDao for SqliteCategoryDao<'_> {
    fn list_by_secret(&self, secret: SecretKey) -> ConnResult<Vec<CategoryRecord>> {
        self.conn.execute(
            "SELECT c.pk_category, c.name
             FROM category c
             INNER JOIN secret_category sc ON sc.pk_category = c.pk_category
             WHERE sc.pk_secret = ?1
             ORDER BY c.pk_category;",
            [secret.0],
        )?;
        self.conn.fetch_all_as()
    }
}
