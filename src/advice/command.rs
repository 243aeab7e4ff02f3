use super::{
    prompt, AdviceProvider, AdviceRequest, AdviceResponse, CriterionSuggestion,
    FinancialWeightSuggestion,
};
use crate::error::{CompassError, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    kind: &'static str,
    prompt: String,
    request: &'a AdviceRequest,
}

#[derive(Debug, Deserialize)]
struct AdviceReply {
    advice: String,
}

#[derive(Debug, Deserialize)]
struct SuggestionsReply<T> {
    suggestions: Vec<T>,
}

/// Delegates advice to an external program that reads a JSON envelope on
/// stdin and answers on stdout.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| CompassError::Advice("advice command is empty".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn run(&self, input: &[u8]) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CompassError::Advice(format!("failed to start {}: {e}", self.program)))?;

        // stdin is written while stdout drains; providers may exit without reading it.
        let stdin = child.stdin.take();
        let payload = input.to_vec();
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload)?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!(program = %self.program, "advice provider closed stdin before reading the request");
            }
            Ok(Err(e)) => return Err(CompassError::Io(e)),
            Err(_) => {
                return Err(CompassError::Advice(
                    "failed to write the request to the advice provider".to_string(),
                ))
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CompassError::Advice(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(CompassError::Advice(format!(
                "{} returned no output",
                self.program
            )));
        }
        Ok(stdout)
    }
}

impl AdviceProvider for CommandProvider {
    fn advise(&self, request: &AdviceRequest) -> Result<AdviceResponse> {
        let envelope = Envelope {
            kind: request.kind(),
            prompt: prompt::render(request),
            request,
        };
        let payload = serde_json::to_vec(&envelope)?;
        info!(kind = request.kind(), program = %self.program, "requesting advice");

        let reply = self.run(&payload)?;
        debug!(bytes = reply.len(), "advice provider replied");
        parse_reply(request, &reply)
    }
}

fn parse_reply(request: &AdviceRequest, reply: &str) -> Result<AdviceResponse> {
    let malformed =
        |e: serde_json::Error| CompassError::Advice(format!("malformed provider reply: {e}"));

    if !request.expects_suggestions() {
        if reply.starts_with('{') {
            let parsed: AdviceReply = serde_json::from_str(reply).map_err(malformed)?;
            return Ok(AdviceResponse::Advice(parsed.advice));
        }
        return Ok(AdviceResponse::Advice(reply.to_string()));
    }

    if let AdviceRequest::FinancialWeights { .. } = request {
        let parsed: SuggestionsReply<FinancialWeightSuggestion> =
            serde_json::from_str(reply).map_err(malformed)?;
        return Ok(AdviceResponse::FinancialWeights(parsed.suggestions));
    }

    let parsed: SuggestionsReply<CriterionSuggestion> =
        serde_json::from_str(reply).map_err(malformed)?;
    Ok(AdviceResponse::CriteriaSuggestions(parsed.suggestions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes_no() -> AdviceRequest {
        AdviceRequest::YesNo {
            context: "Should I learn to play the piano?".to_string(),
        }
    }

    #[test]
    fn plain_text_reply_is_advice() {
        let response = parse_reply(&yes_no(), "Go for it.").expect("reply should parse");
        assert_eq!(response, AdviceResponse::Advice("Go for it.".to_string()));
    }

    #[test]
    fn json_advice_reply_is_unwrapped() {
        let response =
            parse_reply(&yes_no(), r#"{"advice": "Yes, start small."}"#).expect("reply should parse");
        assert_eq!(
            response,
            AdviceResponse::Advice("Yes, start small.".to_string())
        );
    }

    #[test]
    fn suggestion_reply_requires_json() {
        let request = AdviceRequest::FinancialWeights {
            context: "Open a bakery downtown".to_string(),
        };
        let err = parse_reply(&request, "use 50/50").expect_err("prose should be rejected");
        assert!(err.to_string().contains("malformed provider reply"));

        let response = parse_reply(
            &request,
            r#"{"suggestions": [{"fixed_cost_weight": 0.7, "variable_cost_weight": 0.3, "rationale": "Rent dominates"}]}"#,
        )
        .expect("suggestions should parse");
        match response {
            AdviceResponse::FinancialWeights(suggestions) => {
                assert_eq!(suggestions.len(), 1);
                assert_eq!(suggestions[0].rationale, "Rent dominates");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(CommandProvider::new(&[]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn command_provider_reads_program_stdout() {
        let command = vec![
            "sh".to_string(),
            "-c".to_string(),
            "cat >/dev/null; echo 'Take the job.'".to_string(),
        ];
        let provider = CommandProvider::new(&command).expect("command should build");
        let response = provider.advise(&yes_no()).expect("provider should answer");
        assert_eq!(response, AdviceResponse::Advice("Take the job.".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn command_provider_tolerates_programs_that_ignore_stdin() {
        let command = vec!["echo".to_string(), "Go for it".to_string()];
        let provider = CommandProvider::new(&command).expect("command should build");
        for _ in 0..20 {
            let response = provider.advise(&yes_no()).expect("provider should answer");
            assert_eq!(response, AdviceResponse::Advice("Go for it".to_string()));
        }
    }

    #[cfg(unix)]
    #[test]
    fn command_provider_handles_large_requests() {
        let command = vec!["sh".to_string(), "-c".to_string(), "cat".to_string()];
        let provider = CommandProvider::new(&command).expect("command should build");
        let request = AdviceRequest::YesNo {
            context: "x".repeat(256 * 1024),
        };
        let reply = provider
            .run(&serde_json::to_vec(&request).expect("request should serialize"))
            .expect("provider should echo the request");
        assert!(reply.len() > 256 * 1024);
    }

    #[cfg(unix)]
    #[test]
    fn command_provider_surfaces_failures() {
        let command = vec![
            "sh".to_string(),
            "-c".to_string(),
            "cat >/dev/null; echo quota exceeded >&2; exit 4".to_string(),
        ];
        let provider = CommandProvider::new(&command).expect("command should build");
        let err = provider.advise(&yes_no()).expect_err("provider should fail");
        assert!(err.to_string().contains("quota exceeded"));
    }
}
