use anyhow::Result;
use httpmock::prelude::*;
use interview_coach::core::{ApiClient, InterviewEngine, RunOptions};
use interview_coach::ui::{Console, Notice};
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

/// Replays scripted prompt answers and records everything shown to the user.
struct ScriptedConsole {
    answers: VecDeque<Option<String>>,
    said: Rc<RefCell<Vec<String>>>,
    notices: Rc<RefCell<Vec<(Notice, String)>>>,
}

impl Console for ScriptedConsole {
    fn say(&mut self, text: &str) {
        self.said.borrow_mut().push(text.to_string());
    }

    fn notify(&mut self, notice: Notice, message: &str) {
        self.notices.borrow_mut().push((notice, message.to_string()));
    }

    fn prompt(&mut self, _label: &str) -> io::Result<Option<String>> {
        Ok(self.answers.pop_front().unwrap_or(None))
    }

    fn prompt_multiline(&mut self, _label: &str) -> io::Result<Option<String>> {
        Ok(self.answers.pop_front().unwrap_or(None))
    }
}

type Said = Rc<RefCell<Vec<String>>>;
type Notices = Rc<RefCell<Vec<(Notice, String)>>>;

fn scripted(answers: &[Option<&str>]) -> (ScriptedConsole, Said, Notices) {
    colored::control::set_override(false);
    let said = Rc::new(RefCell::new(Vec::new()));
    let notices = Rc::new(RefCell::new(Vec::new()));
    let console = ScriptedConsole {
        answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
        said: said.clone(),
        notices: notices.clone(),
    };
    (console, said, notices)
}

fn transcript(said: &Said) -> String {
    said.borrow().join("\n")
}

#[tokio::test]
async fn test_full_interview_round() -> Result<()> {
    let server = MockServer::start();
    let analyze_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/analyze-resume")
            .json_body(json!({"text": "5 years building APIs with Go and SQL"}));
        then.status(200)
            .json_body(json!({"skills": ["Go", "SQL"], "experience_level": "mid"}));
    });
    // The explicit level override must reach question generation even though
    // the resume analysis said "mid"
    let generate_mock = server.mock(|when, then| {
        when.method(POST).path("/generate-questions").json_body(json!({
            "role": "Backend Engineer",
            "experience_level": "senior",
            "skills": ["Go", "SQL"]
        }));
        then.status(200).json_body(json!({"questions": [
            {"id": 1, "question": "Describe a production incident you handled."},
            {"id": 2, "question": "How do you design a rate limiter?"}
        ]}));
    });
    let evaluate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/evaluate-answer")
            .json_body_partial(
                r#"{
                    "question": "Describe a production incident you handled.",
                    "resume_skills": ["Go", "SQL"],
                    "role": "Backend Engineer"
                }"#,
            );
        then.status(200).json_body(json!({
            "relevance": 8,
            "confidence": 90,
            "structure_star": true,
            "missing_points": [],
            "improved_answer": "Situation: our payments API began timing out..."
        }));
    });

    let (console, said, notices) = scripted(&[
        Some("Backend Engineer"),
        Some("Senior"),
        Some(""),
        Some("5 years building APIs with Go and SQL"),
        Some("Situation: our API was slow. Task: speed it up. Action: I profiled and removed N+1 queries. Result: p99 dropped 40 percent."),
        Some("skip"),
        Some("n"),
    ]);

    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    engine.run(RunOptions::default()).await?;

    analyze_mock.assert();
    generate_mock.assert();
    evaluate_mock.assert();

    let output = transcript(&said);
    assert!(output.contains("Interview Questions for Backend Engineer"));
    assert!(output.contains("Q1 Describe a production incident you handled."));
    assert!(output.contains("Q2 How do you design a rate limiter?"));
    assert!(output.contains("Relevance:  8/10"));
    assert!(output.contains("Confidence: 90%"));
    assert!(output.contains("✓ STAR Detected"));
    assert!(output.contains("Great answer! Keep practicing with different scenarios."));
    assert!(output.contains("Stronger Answer Example:"));
    assert!(output.contains("Interview Summary"));
    assert!(output.contains("Role: Backend Engineer"));
    assert!(output.contains("Questions Answered: 1/2"));
    assert!(output.contains("Average Relevance: 8.0/10"));
    assert!(output.contains("STAR Structure Detected: 1/1"));
    assert!(notices.borrow().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_inferred_level_used_without_override() -> Result<()> {
    let server = MockServer::start();
    let analyze_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/analyze-resume")
            .json_body(json!({"text": "Recent bootcamp graduate"}));
        then.status(200)
            .json_body(json!({"skills": ["Python"], "experience_level": "junior"}));
    });
    // With the level prompt left blank, question generation runs with the
    // analyzed level
    let generate_mock = server.mock(|when, then| {
        when.method(POST).path("/generate-questions").json_body(json!({
            "role": "Data Analyst",
            "experience_level": "junior",
            "skills": ["Python"]
        }));
        then.status(200).json_body(json!({"questions": [
            {"id": 1, "question": "How do you validate a dataset?"}
        ]}));
    });

    let (console, _said, notices) = scripted(&[
        Some("Data Analyst"),
        Some(""),
        Some(""),
        Some("Recent bootcamp graduate"),
        Some("skip"),
        Some("n"),
    ]);

    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    engine.run(RunOptions::default()).await?;

    analyze_mock.assert();
    generate_mock.assert();
    assert!(notices.borrow().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_resume_reprompts_without_request() -> Result<()> {
    let server = MockServer::start();
    let analyze_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/analyze-resume")
            .json_body(json!({"text": "QA for 3 years"}));
        then.status(200)
            .json_body(json!({"skills": ["Testing"], "experience_level": "junior"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/generate-questions");
        then.status(200).json_body(json!({"questions": [
            {"id": 1, "question": "How do you triage a flaky test?"}
        ]}));
    });

    let (console, _said, notices) = scripted(&[
        Some("QA Engineer"),
        Some(""),
        Some(""),
        Some("   "), // blank paste, rejected before any request
        Some(""),
        Some("QA for 3 years"),
        Some("skip"),
        Some("n"),
    ]);

    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    engine.run(RunOptions::default()).await?;

    analyze_mock.assert();
    assert!(notices.borrow().contains(&(
        Notice::Warn,
        "Please upload a file or paste your resume text.".to_string()
    )));
    Ok(())
}

#[tokio::test]
async fn test_blank_answer_reprompts_without_request() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/analyze-resume");
        then.status(200)
            .json_body(json!({"skills": ["Go"], "experience_level": "mid"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/generate-questions");
        then.status(200).json_body(json!({"questions": [
            {"id": 1, "question": "Tell me about a recent project."}
        ]}));
    });
    let evaluate_mock = server.mock(|when, then| {
        when.method(POST).path("/evaluate-answer");
        then.status(200).json_body(json!({
            "relevance": 5,
            "confidence": 50,
            "structure_star": false,
            "missing_points": [],
            "improved_answer": "..."
        }));
    });

    let (console, _said, notices) = scripted(&[
        Some(""), // blank answer, rejected before any request
        Some("skip"),
        Some("n"),
    ]);

    let opts = RunOptions {
        role: Some("Backend Engineer".to_string()),
        level: Some("mid".to_string()),
        resume_file: None,
        resume_text: Some("resume text here".to_string()),
    };
    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    engine.run(opts).await?;

    evaluate_mock.assert_hits(0);
    assert!(notices.borrow().contains(&(
        Notice::Warn,
        "Please type an answer before submitting.".to_string()
    )));
    Ok(())
}

#[tokio::test]
async fn test_evaluation_error_keeps_question_open() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/analyze-resume");
        then.status(200)
            .json_body(json!({"skills": ["Go"], "experience_level": "mid"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/generate-questions");
        then.status(200).json_body(json!({"questions": [
            {"id": 1, "question": "Tell me about a recent project."}
        ]}));
    });
    let evaluate_mock = server.mock(|when, then| {
        when.method(POST).path("/evaluate-answer");
        then.status(500)
            .json_body(json!({"detail": "scoring model offline"}));
    });

    let (console, said, notices) = scripted(&[
        Some("I would shard the database."),
        Some("skip"), // give up on this question after the failure
        Some("n"),
    ]);

    let opts = RunOptions {
        role: Some("Backend Engineer".to_string()),
        level: Some("mid".to_string()),
        resume_file: None,
        resume_text: Some("resume text here".to_string()),
    };
    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    engine.run(opts).await?;

    evaluate_mock.assert();
    assert!(notices.borrow().contains(&(
        Notice::Error,
        "Error: API Error 500: scoring model offline".to_string()
    )));
    // Nothing was recorded for the failed submission
    assert!(transcript(&said).contains("Questions Answered: 0/1"));
    Ok(())
}

#[tokio::test]
async fn test_quit_jumps_to_summary() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/analyze-resume");
        then.status(200)
            .json_body(json!({"skills": ["Go"], "experience_level": "mid"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/generate-questions");
        then.status(200).json_body(json!({"questions": [
            {"id": 1, "question": "Tell me about a recent project."},
            {"id": 2, "question": "How do you design a rate limiter?"}
        ]}));
    });
    let evaluate_mock = server.mock(|when, then| {
        when.method(POST).path("/evaluate-answer");
        then.status(200).json_body(json!({
            "relevance": 6,
            "confidence": 70,
            "structure_star": false,
            "missing_points": ["Quantify the impact"],
            "improved_answer": "..."
        }));
    });

    let (console, said, _notices) = scripted(&[
        Some("I shipped a billing service last quarter."),
        Some("quit"), // leave the second question unanswered
        Some("n"),
    ]);

    let opts = RunOptions {
        role: Some("Backend Engineer".to_string()),
        level: Some("mid".to_string()),
        resume_file: None,
        resume_text: Some("resume text here".to_string()),
    };
    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    engine.run(opts).await?;

    evaluate_mock.assert();
    let output = transcript(&said);
    assert!(output.contains("Interview Summary"));
    assert!(output.contains("Questions Answered: 1/2"));
    assert!(output.contains("Average Relevance: 6.0/10"));
    Ok(())
}

#[tokio::test]
async fn test_restart_builds_fresh_session() -> Result<()> {
    let server = MockServer::start();
    let analyze_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/analyze-resume")
            .json_body(json!({"text": "resume one"}));
        then.status(200)
            .json_body(json!({"skills": ["Go"], "experience_level": "mid"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/generate-questions");
        then.status(200).json_body(json!({"questions": [
            {"id": 1, "question": "Tell me about a recent project."}
        ]}));
    });

    let (console, said, _notices) = scripted(&[
        Some("Dev"),
        Some(""),
        Some(""),
        Some("resume one"),
        Some("skip"),
        Some("y"),
        // Second round starts from a blank form
        Some("Dev"),
        Some(""),
        Some(""),
        Some("resume one"),
        Some("skip"),
        Some("n"),
    ]);

    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    engine.run(RunOptions::default()).await?;

    analyze_mock.assert_hits(2);
    let output = transcript(&said);
    assert_eq!(output.matches("Interview Summary").count(), 2);
    assert_eq!(output.matches("Questions Answered: 0/1").count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_flagged_bad_resume_file_fails() -> Result<()> {
    let server = MockServer::start();
    let analyze_mock = server.mock(|when, then| {
        when.method(POST).path("/analyze-resume");
        then.status(200)
            .json_body(json!({"skills": [], "experience_level": "junior"}));
    });

    let (console, _said, _notices) = scripted(&[]);
    let opts = RunOptions {
        role: Some("Backend Engineer".to_string()),
        level: Some("mid".to_string()),
        resume_file: Some("resume.docx".into()),
        resume_text: None,
    };
    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    let err = engine.run(opts).await.unwrap_err();

    assert_eq!(err.to_string(), "Please upload a PDF or text file.");
    analyze_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_input_closed_quits_cleanly() -> Result<()> {
    let server = MockServer::start();
    let analyze_mock = server.mock(|when, then| {
        when.method(POST).path("/analyze-resume");
        then.status(200)
            .json_body(json!({"skills": [], "experience_level": "junior"}));
    });

    let (console, _said, _notices) = scripted(&[None]);
    let client = ApiClient::new(server.base_url())?;
    let mut engine = InterviewEngine::new(client, console);
    engine.run(RunOptions::default()).await?;

    analyze_mock.assert_hits(0);
    Ok(())
}
