pub use zerocopy::BigEndian;

pub mod convert;
pub mod error;
pub mod read;
pub mod schem;
pub mod tag;
pub mod value;
pub mod write;

pub use convert::*;
pub use error::*;
pub use read::*;
pub use schem::*;
pub use tag::*;
pub use value::*;
pub use write::*;
