//! hostchart: live CPU, memory and network charts for one host, polled from a
//! `hostchart_agent` over WebSocket.

pub mod app;
pub mod axis;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod panels;
pub mod poller;
pub mod profiles;
pub mod types;
pub mod ui;
pub mod ws;
