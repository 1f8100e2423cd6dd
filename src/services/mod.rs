pub mod comparison;
pub mod discord;
pub mod forecast;
pub mod jma;
pub mod observation;
pub mod pipeline;
pub mod report;
pub mod timeseries;
pub mod weather_codes;
