//! Closed set of sort columns and directions for record listings.
//! User text is validated here and only ever mapped to fixed SQL fragments.

use crate::errors::{AppError, AppResult};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    OrderId,
    StudentId,
    Name,
    #[default]
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortKey {
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::OrderId => "order_id",
            SortKey::StudentId => "student_id",
            SortKey::Name => "name",
            SortKey::Timestamp => "timestamp",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "order_id" | "order" | "id" => Ok(SortKey::OrderId),
            "student_id" | "student" => Ok(SortKey::StudentId),
            "name" => Ok(SortKey::Name),
            "timestamp" | "time" => Ok(SortKey::Timestamp),
            _ => Err(AppError::InvalidSortKey(s.to_string())),
        }
    }
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(AppError::InvalidSortOrder(s.to_string())),
        }
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::parse(s)
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::parse(s)
    }
}
