use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ModelSelection {
    pub key: &'static str,
    pub model: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

pub static PROVIDERS: [ModelSelection; 3] = [
    ModelSelection {
        key: "gemini",
        model: "google/gemini-pro-1.5",
        name: "Gemini",
        color: "blue",
    },
    ModelSelection {
        key: "deepseek",
        model: "deepseek/deepseek-chat",
        name: "DeepSeek",
        color: "indigo",
    },
    ModelSelection {
        key: "ollama",
        model: "meta-llama/llama-3-8b-instruct:free",
        name: "Ollama (Llama 3 8B via OpenRouter)",
        color: "purple",
    },
];

pub fn find_model(key: &str) -> Option<&'static ModelSelection> {
    let key = key.trim();
    PROVIDERS
        .iter()
        .find(|provider| provider.key.eq_ignore_ascii_case(key))
}
