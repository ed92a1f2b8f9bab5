use crate::models::{
    ChatTurn, GenerationOutput, InferenceRequest, InferenceResult, Intent, Policy, ReplySource,
    ResponseShape,
};
use crate::services::ai::classifier::classify;
use crate::services::ai::policy::policy_for;
use crate::services::ai::{fallback, parser, InferenceGateway};

#[derive(Debug)]
pub struct ChatReply {
    pub agent: Intent,
    pub output: GenerationOutput,
    pub source: ReplySource,
}

/// Routes one message to an agent and answers it, falling back to canned text
/// whenever the gateway cannot. `agent` overrides classification when set.
pub async fn respond(
    gateway: &dyn InferenceGateway,
    history: &[ChatTurn],
    message: &str,
    agent: Option<Intent>,
    shape: ResponseShape,
) -> ChatReply {
    let agent = agent.unwrap_or_else(|| classify(message));
    let policy = policy_for(agent);

    tracing::info!(
        agent = agent.as_str(),
        history = history.len(),
        "routing chat message"
    );

    let transcript = transcript(history, message);
    let request = InferenceRequest::generate(&transcript, Some(policy));

    let (text, source) = match gateway.invoke(&request).await {
        Ok(InferenceResult::Text { body }) => (body, ReplySource::Model),
        Ok(other) => {
            tracing::warn!(kind = other.kind().as_str(), "unexpected result for generation call");
            (fallback::chat_reply(agent, message), ReplySource::Fallback)
        }
        Err(e) => {
            tracing::warn!(error = %e, agent = agent.as_str(), "generation failed, using fallback");
            (fallback::chat_reply(agent, message), ReplySource::Fallback)
        }
    };

    ChatReply {
        agent,
        output: shape_output(with_label(policy, &text), shape),
        source,
    }
}

/// Prior turns replayed as a plain transcript, ending with an open assistant turn.
fn transcript(history: &[ChatTurn], message: &str) -> String {
    let mut out = String::new();
    for turn in history {
        let speaker = if turn.is_user() { "User" } else { "Assistant" };
        out.push_str(&format!("{speaker}: {}\n\n", turn.content.trim()));
    }
    out.push_str(&format!("User: {}\n\nAssistant:", message.trim()));
    out
}

pub fn with_label(policy: &Policy, text: &str) -> String {
    let label = policy.opening_label();
    let text = text.trim();
    if text.starts_with(&label) {
        text.to_string()
    } else {
        format!("{label} {text}")
    }
}

pub fn shape_output(text: String, shape: ResponseShape) -> GenerationOutput {
    match shape {
        ResponseShape::Text => GenerationOutput::Text(text),
        ResponseShape::Stream => {
            GenerationOutput::Stream(text.split_inclusive(' ').map(str::to_string).collect())
        }
        ResponseShape::Sectioned => GenerationOutput::Sectioned {
            answer: parser::parse(&text),
            raw: text,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::services::ai::GatewayError;

    struct RecordingGateway {
        reply: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingGateway {
        fn new(reply: Option<&'static str>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl InferenceGateway for RecordingGateway {
        async fn invoke(
            &self,
            request: &InferenceRequest<'_>,
        ) -> Result<InferenceResult, GatewayError> {
            self.prompts.lock().unwrap().push(request.prompt());
            match self.reply {
                Some(body) => Ok(InferenceResult::Text {
                    body: body.to_string(),
                }),
                None => Err(GatewayError::Timeout),
            }
        }
    }

    #[tokio::test]
    async fn test_model_reply_gets_agent_label() {
        let gateway = RecordingGateway::new(Some("Try a short walk after lunch."));
        let reply = respond(&gateway, &[], "any tips for today?", None, ResponseShape::Text).await;
        assert_eq!(reply.agent, Intent::Wellness);
        assert_eq!(reply.source, ReplySource::Model);
        assert_eq!(
            reply.output,
            GenerationOutput::Text("Wellness Agent: Try a short walk after lunch.".to_string())
        );
    }

    #[tokio::test]
    async fn test_existing_label_is_kept() {
        let gateway = RecordingGateway::new(Some("Nutrition Agent: Eat more fiber."));
        let reply = respond(&gateway, &[], "what about fiber", None, ResponseShape::Text).await;
        assert_eq!(reply.output.text(), "Nutrition Agent: Eat more fiber.");
    }

    #[tokio::test]
    async fn test_gateway_failure_falls_back() {
        let gateway = RecordingGateway::new(None);
        let reply = respond(&gateway, &[], "I have chest pain", None, ResponseShape::Text).await;
        assert_eq!(reply.agent, Intent::Emergency);
        assert_eq!(reply.source, ReplySource::Fallback);
        let text = reply.output.text();
        assert!(text.starts_with("Emergency Agent: "));
        assert!(text.contains("emergency services"));
    }

    #[tokio::test]
    async fn test_prompt_carries_policy_and_history() {
        let gateway = RecordingGateway::new(Some("ok"));
        let history = vec![
            ChatTurn::user("I sleep badly"),
            ChatTurn {
                role: "assistant".to_string(),
                content: "How many hours?".to_string(),
            },
        ];
        respond(&gateway, &history, "about five", Some(Intent::Wellness), ResponseShape::Text)
            .await;

        let prompts = gateway.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.starts_with(policy_for(Intent::Wellness).directive));
        assert!(prompt.contains("User: I sleep badly\n\nAssistant: How many hours?"));
        assert!(prompt.ends_with("User: about five\n\nAssistant:"));
    }

    #[tokio::test]
    async fn test_stream_tokens_rebuild_text() {
        let gateway = RecordingGateway::new(Some("Drink water often."));
        let reply = respond(&gateway, &[], "thirsty", None, ResponseShape::Stream).await;
        match &reply.output {
            GenerationOutput::Stream(tokens) => {
                assert_eq!(tokens.len(), 5);
                assert_eq!(tokens.concat(), "Wellness Agent: Drink water often.");
            }
            other => panic!("expected stream, got {other:?}"),
        }
    }
}
