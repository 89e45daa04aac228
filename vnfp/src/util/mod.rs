/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

/// Seeded randomness helpers for search procedures built on top of this library.
pub mod random;

mod config;
mod keyed_matrix;

#[doc(inline)]
pub use config::AssemblyConfig;
#[doc(inline)]
pub use config::UnplacedServerPolicy;
#[doc(inline)]
pub use keyed_matrix::KeyedMatrix;
