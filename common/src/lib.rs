//! Fetal Care Common Library
//!
//! CLIと他のフロントエンドで共有される型とフォームロジック
//! （入出力を持たない）

pub mod analyzer;
pub mod auth;
pub mod band;
pub mod batch;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod fields;
pub mod form;
pub mod history;
pub mod payload;
pub mod preference;
pub mod response;
pub mod storage;
pub mod submission;
pub mod validate;

pub use analyzer::{AfiAnalyzer, AnalysisRequest, AnalyzerAction};
pub use auth::{Credentials, Registration, Role, Session};
pub use band::{AfiBand, BandLevel};
pub use batch::{ImageBatch, ImageFile, SelectionOutcome};
pub use dashboard::{FormAction, PredictionForm, SubmitRequest};
pub use display::{AfiReport, PredictionView};
pub use error::{Error, Result};
pub use fields::{fields_for_mode, FieldGroup, FieldSpec, SubmissionMode, PREDICTION_FIELDS};
pub use form::FormState;
pub use history::{HistoryEntry, HistoryLog, HistoryStore};
pub use payload::{build_prediction_payload, PredictionPayload};
pub use preference::Theme;
pub use response::{AnalysisResult, PredictionResponse, Reply, TokenResponse, UserProfile};
pub use storage::{KeyValueStore, MemoryStore};
pub use validate::{validate, ValidationResult};
