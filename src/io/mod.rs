pub mod emissions;
pub mod gdp;
