/// How the aggregator treats a failed panel fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegradePolicy {
    /// Any failed sub-fetch fails the whole aggregation; no partial result.
    #[default]
    AllOrNothing,
    /// Failed panels are marked and the rest of the dashboard is returned.
    /// The profile lookup stays fatal under this policy: it carries the
    /// identity and the avatar.
    BestEffort,
}
