// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::audit::{
    AuditRequest, Coordinates, Location, ModelError, SearchEngineKind,
};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AuditRequestDto {
    #[validate(length(min = 1, message = "Website cannot be empty"))]
    pub website: String,
    #[validate(length(min = 1, message = "Keywords cannot be empty"))]
    pub keywords: String,
    pub location: Option<String>, // state name or the current-location sentinel
    pub engine: Option<String>,   // e.g., "Google", "bing"
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl AuditRequestDto {
    /// 转换为领域请求；只有经纬度同时给出时才携带坐标
    pub fn into_request(self) -> Result<AuditRequest, ModelError> {
        let engine = match self.engine.as_deref().map(str::trim) {
            None | Some("") => SearchEngineKind::default(),
            Some(name) => name.parse()?,
        };
        let location = self.location.map(Location::from).unwrap_or_default();
        let coordinates = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Ok(AuditRequest::new(self.website, self.keywords, location, engine)
            .with_coordinates(coordinates))
    }
}
