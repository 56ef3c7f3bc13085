//! The pagination envelope wrapped around every list response.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use log::*;
use serde::Deserialize;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total: u32,
}

/// One page of a list response.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T: Debug> Page<T> {
    /// Whether `page` (1-based) was the last one to fetch.
    pub fn is_last(&self, page: u32) -> bool {
        self.pagination.total_pages <= page
    }

    /// Extract the one entry a per-object query is expected to return.
    ///
    /// More than one entry is logged and the first is used; an empty list is an error.
    pub fn into_single(self, operation: &str) -> Result<T, Error> {
        if self.data.len() > 1 {
            warn!(
                "unexpected {operation} response: {} entries, using the first: {:?}",
                self.data.len(),
                self.data
            );
        }

        self.data.into_iter().next().ok_or_else(|| {
            warn!("{operation} response contained no entries");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::OutOfRange(format!(
                    "{operation} response contained no entries"
                ))),
            }
        })
    }
}
