//! Hiring Intake - Conversational Job Application Collector
//!
//! This crate walks applicants through a fixed questionnaire one message at
//! a time, validates each answer, and hands the finished application to a
//! review channel.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
