//! Query-string types for the toy endpoints.
//!
//! Fields are kept as raw strings so malformed numbers fall back to defaults
//! instead of being rejected by the extractor.

use serde::Deserialize;
use toybox_core::listing::{PageWindow, PriceSort};

/// `GET /allToys?page=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn window(&self) -> PageWindow {
        PageWindow::from_params(self.page.as_deref(), self.limit.as_deref())
    }
}

/// `GET /myToys?email=&sortToy=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerParams {
    pub email: Option<String>,
    pub sort_toy: Option<String>,
}

impl SellerParams {
    pub fn sort(&self) -> PriceSort {
        PriceSort::from_param(self.sort_toy.as_deref())
    }
}
