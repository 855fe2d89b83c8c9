pub mod cash_flows;
pub mod menu;
pub mod time_value;
