mod attack;
mod charts;
mod clock;
mod colors;
mod generator;
mod logs;
mod metrics;
mod threat;
mod timed;
mod timeline;

pub mod feed;
pub mod views;

pub use self::attack::{AttackPanel, AttackScenario, ScenarioId, ScenarioSink, SCENARIOS};
pub use self::charts::{
    default_distribution, default_latency, slice_color, slice_spans, Charts, DistributionSlice,
    LatencySample, LatencyStats, LATENCY_TARGET_MS, SLICE_PALETTE,
};
pub use self::clock::{format_hms, local_now, rewind, since_label, CLOCK_PLACEHOLDER};
pub use self::colors::StatusColor;
pub use self::generator::{LogCatalog, LogSource, SyntheticGenerator, TimelineSource};
pub use self::logs::{
    LogEntry, LogFeed, LogsPanel, Severity, DEFAULT_MAX_VISIBLE, EMPTY_LOGS_MESSAGE, LOG_SEED_COUNT,
    LOG_SEED_SPACING, LOG_TICK,
};
pub use self::metrics::{
    default_metrics, format_thousands, CountUp, MetricEntry, MetricsGrid, Trend,
    COUNT_UP_DURATION, COUNT_UP_STEPS,
};
pub use self::threat::{ThreatLevel, ThreatState, THREAT_HOLD};
pub use self::timed::TimedFlag;
pub use self::timeline::{
    NetworkTimeline, RollingTimeline, TimelineEvent, TrafficCounts, TrafficKind,
    DEFAULT_BLOCKED_PROBABILITY, TIMELINE_CAPACITY, TIMELINE_TICK,
};
