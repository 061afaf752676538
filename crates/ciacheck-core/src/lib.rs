//! ciacheck Core Library
//!
//! Client side of the CIA (confidentiality, integrity, availability) URL
//! analysis service: input validation, the `/analyze` request/response
//! contract, and rendering of the scored report into an output region.

pub mod config;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod model;
pub mod render;
pub mod surface;
pub mod validate;
pub mod view;

pub use config::AnalyzerConfig;
pub use error::{CiaError, CiaResult, ConfigError, GatewayError, InputError};
pub use gateway::{AnalysisGateway, HttpAnalysisGateway};
pub use handler::{AnalysisHandler, Outcome};
pub use model::{AnalysisRequest, AnalysisResponse, Category, CategoryScore, Selection, TestType};
pub use surface::{HtmlRegion, ResultsSurface};
pub use view::{ResultsView, SectionBody, SectionView};
