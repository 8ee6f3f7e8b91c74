pub mod callback;
pub mod entropy;
pub mod mediaconvert;
