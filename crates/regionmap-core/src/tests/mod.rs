mod config;
mod node;
mod regions;
mod session;
mod style;
mod visibility;
