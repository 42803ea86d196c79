use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{join, join_all};
use pulse_core::{DegradePolicy, Delivery, StatKind, UpstreamCatalog, Username};
use pulse_logging::{pulse_debug, pulse_warn};
use tokio::time::timeout;

use crate::fetch::{FetchSettings, ReqwestFetcher, UpstreamFetcher};
use crate::profile::parse_profile;
use crate::{AggregateError, Dashboard, FailureKind, FetchError, FetchOutput, Panel, PanelBody};

/// Fans one lookup out to every upstream in the catalog and joins the
/// settled results into a [`Dashboard`].
pub struct Aggregator {
    fetcher: Arc<dyn UpstreamFetcher>,
    catalog: UpstreamCatalog,
    overall_deadline: Duration,
}

impl Aggregator {
    pub fn new(catalog: UpstreamCatalog, settings: &FetchSettings) -> Result<Self, FetchError> {
        let fetcher = Arc::new(ReqwestFetcher::new(settings)?);
        Ok(Self::with_fetcher(catalog, fetcher, settings.overall_deadline))
    }

    /// Build an aggregator around an existing fetcher. Tests inject fakes
    /// through this.
    pub fn with_fetcher(
        catalog: UpstreamCatalog,
        fetcher: Arc<dyn UpstreamFetcher>,
        overall_deadline: Duration,
    ) -> Self {
        Self {
            fetcher,
            catalog,
            overall_deadline,
        }
    }

    /// Run one lookup: every upstream call starts concurrently and every one
    /// settles before a verdict is reached. A failed panel never cancels its
    /// siblings.
    ///
    /// The profile call is fatal under both policies: a 404 maps to
    /// [`AggregateError::NotFound`], any other profile failure to
    /// [`AggregateError::Upstream`]. Panel failures fail the lookup under
    /// [`DegradePolicy::AllOrNothing`] and are marked in the dashboard under
    /// [`DegradePolicy::BestEffort`].
    pub async fn fetch_all(
        &self,
        username: &Username,
        policy: DegradePolicy,
    ) -> Result<Dashboard, AggregateError> {
        let profile_spec = self.catalog.spec(StatKind::Profile);
        let profile_url = profile_spec.url_for(username);
        let profile_call = self
            .fetcher
            .fetch(&profile_url, profile_spec.accept.as_deref());

        let panel_calls = self
            .catalog
            .specs()
            .iter()
            .filter(|spec| spec.kind != StatKind::Profile)
            .map(|spec| {
                let fetcher = Arc::clone(&self.fetcher);
                let url = spec.url_for(username);
                async move {
                    let result = fetcher.fetch(&url, spec.accept.as_deref()).await;
                    (spec, url, result)
                }
            });

        pulse_debug!("Fanning out {} upstream calls for `{}`", StatKind::ALL.len(), username);

        let joined = timeout(
            self.overall_deadline,
            join(profile_call, join_all(panel_calls)),
        )
        .await;
        let (profile_result, panel_results) = match joined {
            Ok(results) => results,
            Err(_) => {
                pulse_warn!(
                    "Lookup for `{}` exceeded the {}ms deadline",
                    username,
                    self.overall_deadline.as_millis()
                );
                return Err(AggregateError::Upstream {
                    username: username.to_string(),
                    message: "upstream sources timed out".to_string(),
                    status: None,
                });
            }
        };

        let avatar_url = resolve_avatar(username, profile_result)?;

        let mut panels = Vec::with_capacity(panel_results.len());
        let mut first_failure: Option<(StatKind, FetchError)> = None;
        for (spec, url, result) in panel_results {
            let body = match result {
                Ok(_) if spec.delivery == Delivery::Linked => PanelBody::Linked,
                Ok(output) => {
                    PanelBody::Inline(String::from_utf8_lossy(&output.bytes).into_owned())
                }
                Err(err) => {
                    pulse_warn!(
                        "{} fetch for `{}` failed: {} ({})",
                        spec.kind,
                        username,
                        err.kind,
                        err.message
                    );
                    let label = err.kind.to_string();
                    if first_failure.is_none() {
                        first_failure = Some((spec.kind, err));
                    }
                    PanelBody::Failed(label)
                }
            };
            panels.push(Panel {
                kind: spec.kind,
                url,
                body,
            });
        }

        if policy == DegradePolicy::AllOrNothing {
            if let Some((kind, err)) = first_failure {
                return Err(AggregateError::Upstream {
                    username: username.to_string(),
                    message: format!("{kind} fetch failed: {}", err.kind),
                    status: err.kind.status(),
                });
            }
        }

        Ok(Dashboard {
            username: username.clone(),
            avatar_url,
            panels,
        })
    }
}

fn resolve_avatar(
    username: &Username,
    result: Result<FetchOutput, FetchError>,
) -> Result<String, AggregateError> {
    let output = match result {
        Ok(output) => output,
        Err(err) if err.kind == FailureKind::HttpStatus(404) => {
            pulse_debug!("Profile lookup for `{}` returned 404", username);
            return Err(AggregateError::NotFound {
                username: username.to_string(),
            });
        }
        Err(err) => {
            pulse_warn!(
                "Profile lookup for `{}` failed: {} ({})",
                username,
                err.kind,
                err.message
            );
            return Err(AggregateError::Upstream {
                username: username.to_string(),
                message: format!("profile lookup failed: {}", err.kind),
                status: err.kind.status(),
            });
        }
    };

    match parse_profile(&output.bytes) {
        Ok(profile) => Ok(profile.avatar_url),
        Err(err) => {
            pulse_warn!("Profile payload for `{}` was malformed: {}", username, err);
            Err(AggregateError::Upstream {
                username: username.to_string(),
                message: "profile payload was malformed".to_string(),
                status: None,
            })
        }
    }
}
