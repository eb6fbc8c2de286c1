pub mod deploy;
pub mod deploy_token;
pub mod export;
pub mod gas;
pub mod response_time;
pub mod run_all;
