//! Dependencies imported by hosted services

mod some_dependency;

pub use some_dependency::SomeDependency;
#[cfg(test)]
pub(crate) use some_dependency::SOME_DEPENDENCY_PART;
