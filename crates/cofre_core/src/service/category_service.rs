//! Category use-case service.
//!
//! # Responsibility
//! - Turn absence and duplicate names into explicit domain errors.
//! - Promote DAO records into immutable `Category` values.
//!
//! # Invariants
//! - `create` and `rename` look the name up first, so a duplicate surfaces
//!   as `AlreadyExists` instead of a raw integrity violation.
//! - Engine errors (including foreign key violations on `delete`) pass
//!   through unchanged inside `CategoryError::Conn`.
//! - Every call must run inside a transaction scope of the DAO's connection.

use crate::conn::ConnError;
use crate::dao::category_dao::{CategoryDao, CategoryRecord, NewCategoryRecord};
use crate::model::category::{Category, CategoryKey, CategoryName};
use crate::model::secret::SecretKey;
use log::info;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CategoryResult<T> = Result<T, CategoryError>;

/// How a missing category was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLookup {
    Key(CategoryKey),
    Name(String),
}

impl Display for CategoryLookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key {key}"),
            Self::Name(name) => write!(f, "name `{name}`"),
        }
    }
}

/// Domain-level category error.
#[derive(Debug)]
pub enum CategoryError {
    AlreadyExists(String),
    NotFound(CategoryLookup),
    Conn(ConnError),
}

impl CategoryError {
    /// Whether the engine rejected the operation on a constraint, e.g. a
    /// delete of a category still linked to secrets.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::Conn(err) if err.is_integrity_violation())
    }
}

impl Display for CategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(name) => write!(f, "category `{name}` already exists"),
            Self::NotFound(lookup) => write!(f, "category not found by {lookup}"),
            Self::Conn(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CategoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AlreadyExists(_) | Self::NotFound(_) => None,
            Self::Conn(err) => Some(err),
        }
    }
}

impl From<ConnError> for CategoryError {
    fn from(value: ConnError) -> Self {
        Self::Conn(value)
    }
}

/// Use-case service for categories.
pub struct CategoryService<D: CategoryDao> {
    dao: D,
}

impl<D: CategoryDao> CategoryService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    /// Creates a category named `name`.
    ///
    /// # Errors
    /// - `AlreadyExists` when the name is taken.
    /// - `Conn(IntegrityViolation)` when the engine rejects the name
    ///   (e.g. empty or longer than 50 characters).
    pub fn create(&self, name: &str) -> CategoryResult<Category> {
        self.ensure_name_available(name)?;
        let key = self.dao.create(&NewCategoryRecord::new(name))?;
        info!("event=category_create module=service status=ok key={key}");
        Ok(Category::new(key, name))
    }

    /// Renames `category`, returning the updated value.
    ///
    /// Fails with `AlreadyExists` when `new_name` is taken, including by
    /// `category` itself.
    pub fn rename(&self, category: &Category, new_name: &str) -> CategoryResult<Category> {
        self.ensure_name_available(new_name)?;
        let renamed = category.with_name(new_name);
        self.dao.save_with_key(&down(&renamed))?;
        info!(
            "event=category_rename module=service status=ok key={}",
            renamed.key()
        );
        Ok(renamed)
    }

    /// Deletes `category` and hands it back.
    pub fn delete(&self, category: Category) -> CategoryResult<Category> {
        self.dao.delete_by_key(&category.key())?;
        info!(
            "event=category_delete module=service status=ok key={}",
            category.key()
        );
        Ok(category)
    }

    pub fn find_by_key(&self, key: CategoryKey) -> CategoryResult<Option<Category>> {
        Ok(self.dao.fetch_by_key(&key)?.map(promote))
    }

    pub fn find_existing_by_key(&self, key: CategoryKey) -> CategoryResult<Category> {
        self.find_by_key(key)?
            .ok_or(CategoryError::NotFound(CategoryLookup::Key(key)))
    }

    pub fn find_by_name(&self, name: &str) -> CategoryResult<Option<Category>> {
        Ok(self
            .dao
            .fetch_by_natural_key(&CategoryName::from(name))?
            .map(promote))
    }

    pub fn find_existing_by_name(&self, name: &str) -> CategoryResult<Category> {
        self.find_by_name(name)?
            .ok_or_else(|| CategoryError::NotFound(CategoryLookup::Name(name.to_string())))
    }

    /// Fails with `AlreadyExists` when a category named `name` is present.
    pub fn ensure_name_available(&self, name: &str) -> CategoryResult<()> {
        match self.find_by_name(name)? {
            Some(_) => Err(CategoryError::AlreadyExists(name.to_string())),
            None => Ok(()),
        }
    }

    pub fn list_all(&self) -> CategoryResult<Vec<Category>> {
        Ok(self.dao.list_all()?.into_iter().map(promote).collect())
    }

    pub fn list_by_secret_key(&self, secret: SecretKey) -> CategoryResult<Vec<Category>> {
        Ok(self
            .dao
            .list_by_secret(secret)?
            .into_iter()
            .map(promote)
            .collect())
    }

    /// Maps each requested name that exists to its category; names with no
    /// category are dropped.
    pub fn list_by_names(
        &self,
        names: &BTreeSet<String>,
    ) -> CategoryResult<BTreeMap<String, Category>> {
        let natural_keys = names
            .iter()
            .map(|name| CategoryName::from(name.as_str()))
            .collect::<Vec<_>>();
        Ok(self
            .dao
            .list_by_natural_keys(&natural_keys)?
            .into_iter()
            .map(|record| (record.name.clone(), promote(record)))
            .collect())
    }
}

fn promote(record: CategoryRecord) -> Category {
    Category::new(record.key(), record.name)
}

fn down(category: &Category) -> CategoryRecord {
    CategoryRecord::new(category.key().0, category.name())
}
