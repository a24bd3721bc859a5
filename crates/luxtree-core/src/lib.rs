pub mod animator;
pub mod camera;
pub mod caption;
pub mod captions;
pub mod constants;
pub mod dust;
pub mod interaction;
pub mod layout;
pub mod picking;
pub mod scene;
pub mod tone;

pub use animator::*;
pub use camera::*;
pub use caption::*;
pub use captions::*;
pub use dust::*;
pub use interaction::*;
pub use layout::*;
pub use picking::*;
pub use scene::*;
pub use tone::*;
