//! ChatRunner with a scripted MockLlm: plans in replies are executed and reported back.

mod init_logging;

use std::sync::Arc;

use strand::{ChatRunner, ChatSettings, Message, MockLlm, Role};

const LINEAR_PLAN_REPLY: &str = r#"<think>
Use the tools.
</think>

<atom_plan>
{"atoms": [
  {"id": 1, "kind": "tool", "name": "add", "input": {"a": 15, "b": 7}, "dependsOn": []},
  {"id": 2, "kind": "tool", "name": "multiply", "input": {"a": "<result_of_1>", "b": 3}, "dependsOn": [1]},
  {"id": 3, "kind": "tool", "name": "subtract", "input": {"a": "<result_of_2>", "b": 10}, "dependsOn": [2]},
  {"id": 4, "kind": "final", "name": "report", "dependsOn": [3]}
]}
</atom_plan>"#;

/// **Scenario**: a plan reply is executed, the result is sent back, and the model answers.
#[tokio::test]
async fn plan_reply_is_executed_and_reported() {
    let llm = Arc::new(MockLlm::new([LINEAR_PLAN_REPLY, "The answer is 56."]));
    let mut runner = ChatRunner::new(llm.clone(), ChatSettings::default()).with_calculator_prompt();

    let produced = runner
        .add_messages(vec![Message::user("What is (15 + 7) * 3 - 10?")])
        .await
        .unwrap();

    assert_eq!(produced.len(), 3);
    assert_eq!(produced[0].role(), Role::Assistant);
    assert!(produced[0].content().starts_with("<atom_plan>"));
    match &produced[1] {
        Message::Tool {
            content,
            tool_call_id,
        } => {
            assert_eq!(content, "56.00");
            assert!(tool_call_id.starts_with("call_"), "{}", tool_call_id);
        }
        other => panic!("expected tool message, got {:?}", other),
    }
    assert_eq!(produced[2], Message::assistant("The answer is 56."));

    assert_eq!(llm.call_count(), 2);
    let second_prompt = &llm.received()[1];
    assert_eq!(second_prompt.first().map(Message::role), Some(Role::System));
    assert_eq!(second_prompt.last(), Some(&produced[1]));
    // system + user + assistant + tool + assistant
    assert_eq!(runner.history().len(), 5);
}

/// **Scenario**: a failing plan is reported to the model as an error tool message.
#[tokio::test]
async fn plan_error_goes_back_to_model() {
    let bad_plan = r#"<atom_plan>{"atoms": [
        {"id": 1, "kind": "tool", "name": "divide", "input": {"a": 1, "b": 0}, "dependsOn": []},
        {"id": 2, "kind": "final", "name": "report", "dependsOn": [1]}
    ]}</atom_plan>"#;
    let llm = Arc::new(MockLlm::new([bad_plan, "Cannot divide by zero."]));
    let mut runner = ChatRunner::new(llm, ChatSettings::default());

    let produced = runner
        .add_messages(vec![Message::user("1 / 0?")])
        .await
        .unwrap();

    assert_eq!(produced.len(), 3);
    assert_eq!(produced[1].role(), Role::Tool);
    assert!(
        produced[1].content().contains("division by zero in atom 1"),
        "{}",
        produced[1].content()
    );
}

/// **Scenario**: a model that keeps emitting plans is stopped after max_plan_rounds.
#[tokio::test]
async fn plan_rounds_are_bounded() {
    let llm = Arc::new(MockLlm::with_reply(LINEAR_PLAN_REPLY));
    let settings = ChatSettings {
        max_plan_rounds: 2,
        ..ChatSettings::default()
    };
    let mut runner = ChatRunner::new(llm.clone(), settings);

    let produced = runner
        .add_messages(vec![Message::user("loop")])
        .await
        .unwrap();

    let tools = produced.iter().filter(|m| m.role() == Role::Tool).count();
    assert_eq!(tools, 2);
    assert_eq!(llm.call_count(), 3);
    assert_eq!(produced.last().map(Message::role), Some(Role::Assistant));
}

/// **Scenario**: each user message in a batch gets its own answer, in order.
#[tokio::test]
async fn consecutive_user_messages_each_answered() {
    let llm = Arc::new(MockLlm::new(["Rayleigh scattering.", "Longer path, more red."]));
    let mut runner = ChatRunner::new(llm, ChatSettings::default());

    let produced = runner
        .add_messages(vec![
            Message::system("End your response immediately after the answer."),
            Message::user("Why is the sky blue?"),
            Message::user("And during sunset?"),
        ])
        .await
        .unwrap();

    assert_eq!(
        produced,
        vec![
            Message::assistant("Rayleigh scattering."),
            Message::assistant("Longer path, more red."),
        ]
    );
    assert_eq!(runner.history().len(), 5);
}

/// **Scenario**: history never exceeds max_chat_length and keeps the system prompt.
#[tokio::test]
async fn history_is_bounded() {
    let llm = Arc::new(MockLlm::with_reply("ok"));
    let settings = ChatSettings {
        max_chat_length: 4,
        ..ChatSettings::default()
    };
    let mut runner = ChatRunner::new(llm, settings).with_calculator_prompt();

    for i in 0..5 {
        runner
            .add_messages(vec![Message::user(format!("q{}", i))])
            .await
            .unwrap();
    }

    let messages = runner.history().messages();
    assert_eq!(messages.len(), 4);
    assert!(messages[0].is_system());
    assert_eq!(messages[3], Message::assistant("ok"));
    assert_eq!(messages[2], Message::user("q4"));
}
