//! `SeaORM` entity definitions.

pub mod pollution_checks;
