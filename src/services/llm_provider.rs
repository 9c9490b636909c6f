use std::str::FromStr;

use anyhow::{Context, Result};
use rig::client::completion::CompletionClientDyn;
use rig::client::{ProviderClient, ProviderValue};
use rig::providers::{anthropic, deepseek, gemini, groq, mistral, ollama, openai, openrouter};

/// Chat completion providers usable as a summarization backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatProvider {
    OpenAi,
    Anthropic,
    Groq,
    DeepSeek,
    Gemini,
    Mistral,
    OpenRouter,
    Ollama,
}

impl FromStr for ChatProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "groq" => Ok(Self::Groq),
            "deepseek" => Ok(Self::DeepSeek),
            "gemini" | "google" => Ok(Self::Gemini),
            "mistral" => Ok(Self::Mistral),
            "openrouter" => Ok(Self::OpenRouter),
            "ollama" => Ok(Self::Ollama),
            other => Err(anyhow::anyhow!("Unsupported provider: {other}")),
        }
    }
}

impl ChatProvider {
    pub fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Groq => "groq",
            Self::DeepSeek => "deepseek",
            Self::Gemini => "gemini",
            Self::Mistral => "mistral",
            Self::OpenRouter => "openrouter",
            Self::Ollama => "ollama",
        }
    }

    /// Build a rig completion client. Model selection happens on the agent.
    pub fn completion_client(self, api_key: &str) -> Result<Box<dyn CompletionClientDyn>> {
        let value = ProviderValue::Simple(api_key.to_string());

        let boxed: Box<dyn ProviderClient> = match self {
            Self::OpenAi => openai::Client::<reqwest::Client>::from_val(value).boxed(),
            Self::Anthropic => anthropic::Client::<reqwest::Client>::from_val(value).boxed(),
            Self::Groq => groq::Client::<reqwest::Client>::from_val(value).boxed(),
            Self::DeepSeek => deepseek::Client::<reqwest::Client>::from_val(value).boxed(),
            Self::Gemini => gemini::Client::<reqwest::Client>::from_val(value).boxed(),
            Self::Mistral => mistral::Client::<reqwest::Client>::from_val(value).boxed(),
            Self::OpenRouter => openrouter::Client::<reqwest::Client>::from_val(value).boxed(),
            Self::Ollama => ollama::Client::<reqwest::Client>::from_val(value).boxed(),
        };

        boxed
            .as_completion()
            .context(format!("Provider '{}' does not support completions", self.id()))
    }
}
