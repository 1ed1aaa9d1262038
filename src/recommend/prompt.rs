use crate::config::RecommendationConfig;

pub const CLOSING_INSTRUCTION: &str =
    "For each dish, provide a brief description and basic instructions.";

const REQUIREMENTS_LEAD: &str = "Please consider these additional requirements:";

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    instruction: String,
}

impl PromptTemplate {
    pub fn new(config: &RecommendationConfig) -> Self {
        let instruction = format!(
            "Look at this image of ingredients and suggest {} {} dishes I could make with them. \
             Provide a brief description and basic instructions for each dish. Answer in {}.",
            config.dish_count, config.cuisine, config.language
        );
        Self { instruction }
    }

    /// Builds the prompt text. Requirements are embedded verbatim; an empty
    /// string is treated as absent.
    pub fn build(&self, requirements: Option<&str>) -> String {
        let mut prompt = self.instruction.clone();

        if let Some(requirements) = requirements.filter(|r| !r.is_empty()) {
            prompt.push(' ');
            prompt.push_str(REQUIREMENTS_LEAD);
            prompt.push(' ');
            prompt.push_str(requirements);
            prompt.push('.');
        }

        prompt.push(' ');
        prompt.push_str(CLOSING_INSTRUCTION);
        prompt
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(&RecommendationConfig::default())
    }
}
