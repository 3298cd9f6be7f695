pub mod animatable;
pub mod context;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod keyframed;
pub mod kind;
pub mod region;
pub mod shapes;
pub mod store;
pub mod track;
pub mod values;
pub mod window;

pub use animatable::Animator;
pub use context::{ConversionSettings, DocumentContext, FrameRounding};
pub use error::{ConvertError, Result};
pub use geometry::{Color, Hermite, Matrix2, Vector};
pub use kind::ValueKind;
pub use region::{gen_bline_region, normalize_bline, resample_bline, NormalizedBline};
pub use shapes::{gen_shape, gen_shapes_path};
pub use store::{CurveStore, StoreKey};
pub use track::{Interpolation, Track, Waypoint};
pub use values::WaypointValue;
pub use window::{FrameSet, FrameWindow};
