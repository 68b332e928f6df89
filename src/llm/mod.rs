//! LLM client layer - Anthropic API integration
//!
//! This module provides:
//! - Message types for model communication
//! - LlmClient trait for API abstraction
//! - AnthropicClient implementation
//! - MockLlmClient for tests

pub mod anthropic;
pub mod client;
pub mod types;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use client::{LlmClient, MockLlmClient, MockReply};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, Usage};
