pub mod arc;
