use std::fmt;

use thiserror::Error;
use url::Url;

use crate::Username;

/// Placeholder replaced with the username when a template is rendered.
pub const USER_SLOT: &str = "{user}";

const PROFILE_TEMPLATE: &str = "https://api.github.com/users/{user}";
const STATS_CARD_TEMPLATE: &str =
    "https://github-readme-stats.vercel.app/api?username={user}&show_icons=true&theme=dark";
const STREAK_STATS_TEMPLATE: &str =
    "https://github-readme-streak-stats.herokuapp.com?user={user}&theme=dark";
const TOP_LANGUAGES_TEMPLATE: &str =
    "https://github-readme-stats-sigma-five.vercel.app/api/top-langs/?username={user}&layout=compact&theme=dark";
const HEATMAP_TEMPLATE: &str = "https://ghchart.rshah.org/{user}";
const TROPHIES_TEMPLATE: &str = "https://github-profile-trophy.vercel.app/?username={user}";

/// The fixed set of upstream lookups that make up a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatKind {
    /// GitHub users API; carries the avatar and the not-found signal.
    Profile,
    StatsCard,
    StreakStats,
    TopLanguages,
    Heatmap,
    Trophies,
}

impl StatKind {
    /// Every kind in catalog order. `Profile` comes first: it is the
    /// identity lookup, not a panel.
    pub const ALL: [StatKind; 6] = [
        StatKind::Profile,
        StatKind::StatsCard,
        StatKind::StreakStats,
        StatKind::TopLanguages,
        StatKind::Heatmap,
        StatKind::Trophies,
    ];

    /// The dashboard panels: every kind except `Profile`.
    pub const PANELS: [StatKind; 5] = [
        StatKind::StatsCard,
        StatKind::StreakStats,
        StatKind::TopLanguages,
        StatKind::Heatmap,
        StatKind::Trophies,
    ];
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatKind::Profile => write!(f, "profile"),
            StatKind::StatsCard => write!(f, "stats card"),
            StatKind::StreakStats => write!(f, "streak stats"),
            StatKind::TopLanguages => write!(f, "top languages"),
            StatKind::Heatmap => write!(f, "heatmap"),
            StatKind::Trophies => write!(f, "trophies"),
        }
    }
}

/// How a fetched sub-resource reaches the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The fetched payload is embedded in the aggregate result.
    Inline,
    /// Only the rendered URL is delivered; the presenter loads it directly.
    /// The fetch still runs as an availability probe.
    Linked,
}

/// One upstream endpoint: a URL template parameterized only by the username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSpec {
    pub kind: StatKind,
    pub template: String,
    pub delivery: Delivery,
    /// Optional `Accept` header sent with the fetch.
    pub accept: Option<String>,
}

impl UpstreamSpec {
    pub fn new(kind: StatKind, template: impl Into<String>, delivery: Delivery) -> Self {
        Self {
            kind,
            template: template.into(),
            delivery,
            accept: None,
        }
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Render the template for a username. Validated usernames substitute
    /// as-is; the placeholder may appear more than once.
    pub fn url_for(&self, user: &Username) -> String {
        self.template.replace(USER_SLOT, user.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no spec for {0}")]
    MissingKind(StatKind),
    #[error("catalog has more than one spec for {0}")]
    DuplicateKind(StatKind),
    #[error("template for {kind} does not contain the {USER_SLOT} placeholder: {template}")]
    MissingPlaceholder { kind: StatKind, template: String },
    #[error("template for {kind} does not render to a valid URL: {source}")]
    BadTemplate {
        kind: StatKind,
        #[source]
        source: url::ParseError,
    },
}

/// Immutable table mapping every [`StatKind`] to its upstream endpoint.
///
/// New sub-resources are added by extending this table; the fan-out walks it
/// and never special-cases an entry beyond the profile slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamCatalog {
    // Exactly one spec per kind, held in `StatKind::ALL` order.
    specs: Vec<UpstreamSpec>,
}

impl UpstreamCatalog {
    /// The production table, reproducing the upstream services the original
    /// dashboard was built on. Trophies is delivered by reference: its
    /// payload is raw markup and is never embedded.
    pub fn standard() -> Self {
        Self {
            specs: vec![
                UpstreamSpec::new(StatKind::Profile, PROFILE_TEMPLATE, Delivery::Inline),
                UpstreamSpec::new(StatKind::StatsCard, STATS_CARD_TEMPLATE, Delivery::Inline),
                UpstreamSpec::new(StatKind::StreakStats, STREAK_STATS_TEMPLATE, Delivery::Inline),
                UpstreamSpec::new(
                    StatKind::TopLanguages,
                    TOP_LANGUAGES_TEMPLATE,
                    Delivery::Inline,
                ),
                UpstreamSpec::new(StatKind::Heatmap, HEATMAP_TEMPLATE, Delivery::Inline),
                UpstreamSpec::new(StatKind::Trophies, TROPHIES_TEMPLATE, Delivery::Linked)
                    .with_accept("text/html"),
            ],
        }
    }

    /// Build a catalog from arbitrary specs, validating that every kind is
    /// covered exactly once and that each template renders to a parseable
    /// URL. Template errors surface here, at construction, not per request.
    pub fn from_specs(specs: Vec<UpstreamSpec>) -> Result<Self, CatalogError> {
        for spec in &specs {
            if !spec.template.contains(USER_SLOT) {
                return Err(CatalogError::MissingPlaceholder {
                    kind: spec.kind,
                    template: spec.template.clone(),
                });
            }
            let probe = spec.template.replace(USER_SLOT, "octocat");
            Url::parse(&probe).map_err(|source| CatalogError::BadTemplate {
                kind: spec.kind,
                source,
            })?;
        }

        let mut ordered = Vec::with_capacity(StatKind::ALL.len());
        for kind in StatKind::ALL {
            let mut matches = specs.iter().filter(|spec| spec.kind == kind);
            match (matches.next(), matches.next()) {
                (Some(spec), None) => ordered.push(spec.clone()),
                (Some(_), Some(_)) => return Err(CatalogError::DuplicateKind(kind)),
                (None, _) => return Err(CatalogError::MissingKind(kind)),
            }
        }
        Ok(Self { specs: ordered })
    }

    /// The spec for one kind.
    pub fn spec(&self, kind: StatKind) -> &UpstreamSpec {
        // specs is in StatKind::ALL order, one entry per kind.
        &self.specs[kind as usize]
    }

    /// All specs, in `StatKind::ALL` order.
    pub fn specs(&self) -> &[UpstreamSpec] {
        &self.specs
    }
}
