//! Phichart converts rhythm-game charts between two judge-line timeline schemas.
//!
//! The *flat* schema (PhiFans-style) gives every line one sample track per property. The
//! *layered* schema (RePhiEdit-style) stacks several event layers per line and nests lines under
//! parents. Going layered → flat resolves the hierarchy and resamples it on a fixed beat grid;
//! going flat → layered expands samples back into keyframes.
//!
//! - Load a chart with [`FlatChart::from_path`], [`LayeredChart::from_path`] or [`Chart::from_path`]
//! - Convert with [`to_flat`] / [`to_layered`], tuned by [`ConvertOptions`]
//! - Inspect the [`ConversionReport`] for lossy constructs
//!
//! The timeline engine ([`KeyframeTrack`], [`LayerStack`], [`LineHierarchy`]) is public for
//! callers that evaluate lines directly.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod chart;
pub(crate) mod convert;
pub(crate) mod flatten;
pub(crate) mod timeline;

pub use crate::foundation::beat::{Beat, DEFAULT_EPSILON, DEFAULT_MAX_DENOMINATOR, Reconstructed};
pub use crate::foundation::error::{ConvertError, ConvertResult};

pub use crate::animation::ease::{Ease, evaluate_easing};
pub use crate::timeline::hierarchy::{Line, LineHierarchy};
pub use crate::timeline::layers::{Layer, LayerStack, Property};
pub use crate::timeline::track::{Keyframe, KeyframeTrack};

pub use crate::flatten::{
    FlatSample, FlatTracks, FlattenPath, FlattenedLine, Sampling, expand_tracks, flatten_line,
};

pub use crate::chart::flat::{FlatBpm, FlatChart, FlatInfo, FlatLine, FlatNote};
pub use crate::chart::layered::{
    EventLayer, JudgeLine, LayeredBpm, LayeredChart, LayeredEvent, LayeredNote, Meta, RPE_VERSION,
};
pub use crate::chart::mapping::{
    DEFAULT_SPEED_RATIO, LINE_TEXTURE, NoteKind, X_SCALE, Y_SCALE, flat_easing, layered_easing,
};
pub use crate::chart::{Chart, ChartFormat};

pub use crate::convert::options::ConvertOptions;
pub use crate::convert::report::{ConversionReport, ConversionWarning};
pub use crate::convert::to_flat::to_flat;
pub use crate::convert::to_layered::to_layered;
