//! Complete answer pipeline: Enrich -> Retrieve -> Assemble -> Generate

use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::llm::ImageAnalyzer;
use crate::llm::LanguageModel;
use crate::llm::LlmClient;
use crate::models::AnswerResult;
use crate::rag::ContextAssembler;
use crate::rag::ContextRetriever;
use crate::registry::RegistryClient;
use crate::registry::SemanticIndex;

/// Sampling temperature for answer generation.
const ANSWER_TEMPERATURE: f32 = 0.2;

/// Output-token ceiling for generated answers.
const ANSWER_MAX_TOKENS: u32 = 1000;

/// At most this many source links accompany an answer.
pub const MAX_ANSWER_LINKS: usize = 10;

/// Complete question-answering service
pub struct AnswerService {
    retriever: ContextRetriever,
    context_assembler: ContextAssembler,
    llm: Arc<dyn LanguageModel>,
    vision: Arc<dyn ImageAnalyzer>,
    course_name: String,
}

impl AnswerService {
    /// Create a new answer service from configuration
    ///
    /// # Errors
    /// - Registry client configuration errors (invalid endpoint, client build)
    /// - LLM client configuration errors (invalid endpoint, client build)
    pub fn new(config: &AppConfig) -> Result<Self> {
        let registry: Arc<dyn SemanticIndex> = Arc::new(RegistryClient::new(&config.registry)?);
        let llm_client = Arc::new(LlmClient::new(config)?);

        Ok(Self::from_services(
            registry,
            llm_client.clone(),
            llm_client,
            config,
        ))
    }

    /// Create from existing collaborators
    #[must_use]
    pub fn from_services(
        registry: Arc<dyn SemanticIndex>,
        llm: Arc<dyn LanguageModel>,
        vision: Arc<dyn ImageAnalyzer>,
        config: &AppConfig,
    ) -> Self {
        Self {
            retriever: ContextRetriever::new(registry, &config.registry),
            context_assembler: ContextAssembler::default(),
            llm,
            vision,
            course_name: config.course_name().to_string(),
        }
    }

    /// Answer a question, optionally enriched with an attached image
    ///
    /// Retrieval and image analysis degrade gracefully; only a failing model
    /// invocation surfaces as an error.
    ///
    /// # Errors
    /// - LLM generation errors (API failures, rate limits, timeouts)
    pub async fn answer(&self, question: &str, image: Option<&str>) -> Result<AnswerResult> {
        info!("Processing question ({} chars)", question.len());

        // Step 1: Optional image enrichment
        let effective_query = self.enrich_with_image(question, image).await;

        // Step 2: Retrieve context from both collections
        debug!("Step 2: Retrieving context");
        let (snippets, sources) = self.retriever.retrieve(&effective_query).await;

        // Step 3: Assemble the context block
        debug!("Step 3: Assembling context");
        let context = self.context_assembler.assemble(&snippets);

        // Step 4: Generate the grounded answer
        debug!("Step 4: Generating answer");
        let system = self.build_system_instruction(&context);
        let answer = self
            .llm
            .complete(
                &system,
                &effective_query,
                ANSWER_TEMPERATURE,
                ANSWER_MAX_TOKENS,
            )
            .await?;

        if answer.is_empty() {
            warn!("Model returned an empty answer");
        }

        let links = sources.into_links(MAX_ANSWER_LINKS);
        info!("Question answered with {} source links", links.len());

        Ok(AnswerResult { answer, links })
    }

    /// Append an image description to the question when analysis succeeds
    ///
    /// Image analysis failure is non-fatal: the question passes through
    /// unchanged and the failure is logged.
    async fn enrich_with_image(&self, question: &str, image: Option<&str>) -> String {
        let Some(payload) = image else {
            return question.to_string();
        };

        debug!("Step 1: Analyzing attached image");
        match self.vision.describe(payload).await {
            Ok(description) if !description.is_empty() => {
                format!("{question}\nImage Context: {description}")
            }
            Ok(_) => {
                debug!("Image analysis returned no description");
                question.to_string()
            }
            Err(e) => {
                warn!("Image analysis failed, continuing with text only: {e}");
                question.to_string()
            }
        }
    }

    /// Build the system instruction, embedding the context block verbatim
    fn build_system_instruction(&self, context: &str) -> String {
        format!(
            "You are a Virtual Teaching Assistant for the {} course. \
             Answer questions using ONLY the provided context. Be precise and technical. \
             Do not be ambiguous, and do not suggest to look here and there.\n\
             Context:\n{context}",
            self.course_name
        )
    }

    /// Get retriever reference
    #[must_use]
    pub const fn retriever(&self) -> &ContextRetriever {
        &self.retriever
    }
}
