/// Model ID constants
pub mod models {
    pub mod google {
        pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
        pub const SUPPORTED_MODELS: &[&str] = &[
            "gemini-1.5-flash-latest",
            "gemini-1.5-pro-latest",
            "gemini-2.0-flash",
            "gemini-2.5-flash",
            "gemini-2.5-pro",
        ];
    }
}

/// API endpoints
pub mod urls {
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
}

/// Credential lookup names
pub mod credentials {
    /// Same name as in Streamlit `secrets.toml` files
    pub const PRIMARY_ENV: &str = "GOOGLE_API_KEY";
    pub const FALLBACK_ENV: &str = "GEMINI_API_KEY";
    pub const SECRETS_FILE: &str = "secrets.toml";
    pub const API_KEY_HEADER: &str = "x-goog-api-key";
}

/// Configuration file locations
pub mod paths {
    pub const CONFIG_FILE: &str = "casegen.toml";
    pub const CONFIG_DIR: &str = ".casegen";
    pub const STREAMLIT_DIR: &str = ".streamlit";
}

/// HTTP client defaults
pub mod client {
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const USER_AGENT: &str = concat!("casegen/", env!("CARGO_PKG_VERSION"));
}

/// User-facing strings
pub mod ui {
    pub const TITLE: &str = "🧪 AI-Powered Test Case Generator";
    pub const CAPTION: &str = "For Healthcare Software Requirements | Built with Google Gemini";

    pub const INPUT_HEADER: &str = "Enter Software Requirement";
    pub const OUTPUT_HEADER: &str = "Generated Test Cases";

    pub const REQ_ID_LABEL: &str = "Requirement ID";
    pub const REQ_ID_PLACEHOLDER: &str = "e.g., REQ-045";
    pub const REQ_TEXT_LABEL: &str = "Requirement Text";
    pub const REQ_TEXT_PLACEHOLDER: &str =
        "As a doctor, I want to search for a patient by last name...";

    pub const GENERATE_ACTION: &str = "✨ Generate Test Cases";
    pub const BUSY_MESSAGE: &str = "🤖 AI is thinking... Please wait.";

    pub const KEY_CONFIGURED: &str = "API key configured successfully!";
    pub const KEY_MISSING: &str = "API key not found. Please add it to your secrets.";

    pub const EMPTY_INPUT_ERROR: &str = "Error: Requirement ID and Text cannot be empty.";
    pub const GENERATION_ERROR_PREFIX: &str = "An error occurred";

    pub const ABOUT_HEADER: &str = "About";
    pub const ABOUT_TEXT: &str = "This prototype uses Google's Gemini model to automatically generate test cases from software requirements, demonstrating a significant reduction in manual effort for QA teams in regulated industries.";

    pub const SAMPLES_HEADER: &str = "Sample Requirements";
    pub const SAMPLE_SIMPLE: &str = "As a doctor, I want to be able to search for a patient by their last name so that I can quickly find their record.";
    pub const SAMPLE_COMPLEX: &str = "The system must log all access to patient records in an immutable, HIPAA-compliant audit trail.";
}
