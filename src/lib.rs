pub mod audio;
pub mod beatmap;
pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod lights;
pub mod sequence;
pub mod translator;
pub mod xsq;

pub use config::Config;
pub use convert::{Converter, Report};
pub use error::Error;
pub use sequence::Sequence;
pub use translator::Translator;
