//! # Application State
//!
//! Shared state for the Axum application: the tenant store and the two
//! domain services over it, plus configuration and the optional
//! Prometheus render handle.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use grc_assessment::{AssessmentLifecycle, TemplateCatalog};
use grc_store::{FileSnapshotStore, NotificationSink, TenantStore};
use grc_workflow::{ApprovalWorkflow, ContentGenerator, ScaffoldGenerator};

use crate::config::ApiConfig;
use crate::error::AppError;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The tenant-partitioned store every route reads from.
    pub store: Arc<TenantStore>,
    /// Document approval workflow service.
    pub workflow: Arc<ApprovalWorkflow>,
    /// Assessment lifecycle service.
    pub assessments: Arc<AssessmentLifecycle>,
    /// Service configuration.
    pub config: Arc<ApiConfig>,
    /// Prometheus render handle; absent when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the application state from configuration.
    ///
    /// With a `data_dir` the store persists one JSON snapshot per
    /// tenant; otherwise everything is in memory.
    pub fn build(config: ApiConfig) -> Result<Self, AppError> {
        Self::build_with(config, Arc::new(ScaffoldGenerator), None)
    }

    /// Build with an explicit content generator and notification sink.
    pub fn build_with(
        config: ApiConfig,
        generator: Arc<dyn ContentGenerator>,
        notifier: Option<Arc<dyn NotificationSink>>,
    ) -> Result<Self, AppError> {
        let mut store = TenantStore::in_memory();
        if let Some(dir) = &config.data_dir {
            store = store.with_snapshots(Arc::new(FileSnapshotStore::new(dir.clone())));
        }
        if let Some(notifier) = &notifier {
            store = store.with_notifier(notifier.clone());
        }
        let store = Arc::new(store);

        let mut workflow = ApprovalWorkflow::new(store.clone(), generator);
        let catalog = TemplateCatalog::builtin().map_err(AppError::from)?;
        let mut assessments = AssessmentLifecycle::new(store.clone(), catalog);
        if let Some(notifier) = notifier {
            workflow = workflow.with_notifier(notifier.clone());
            assessments = assessments.with_notifier(notifier);
        }

        Ok(Self {
            store,
            workflow: Arc::new(workflow),
            assessments: Arc::new(assessments),
            config: Arc::new(config),
            metrics: None,
        })
    }

    /// Attach a Prometheus render handle for the `/metrics` route.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
