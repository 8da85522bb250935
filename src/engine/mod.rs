pub mod bot;
pub mod geodesy;
pub mod mask;
pub mod models;
pub mod navigator;
pub mod oracle;
pub mod route;
pub mod simulator;
