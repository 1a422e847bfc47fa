use markdown_generator::{DocsConfig, DocsEnv, GenerateError};

fn env() -> DocsEnv {
    DocsEnv::new(DocsConfig::new("tests/resources/docs"))
}

#[test]
fn e2e_message_table() {
    let out = env().proto_to_table("Task", None).expect("render should succeed");
    let expected = "\
A unit of work tracked by the agent.

| Field            | Type                             | Required   | Description                       |
|------------------|----------------------------------|------------|-----------------------------------|
| `id`             | `string`                         | Yes        | Unique identifier of the task.    |
| `conversationId` | `string`                         | No         | Conversation the task belongs to. |
| `artifacts`      | array of [`Artifact`](#artifact) | No         | Artifacts produced so far.        |
| `metadata`       | `object`                         | No         | Free-form metadata.               |
| `counters`       | map of string to `integer`       | No         |                                   |
| `status`         | [`TaskStatus`](#taskstatus)      | Yes        | Current status.                   |";
    assert_eq!(out, expected);
}

#[test]
fn e2e_directive_comments_leave_no_description() {
    let out = env().proto_to_table("TaskStatus", None).unwrap();
    let expected = "\
| Field       | Type                      | Required   | Description                  |
|-------------|---------------------------|------------|------------------------------|
| `state`     | [`TaskState`](#taskstate) | No         |                              |
| `timestamp` | `timestamp`               | No         | When the state last changed. |";
    assert_eq!(out, expected);
}

#[test]
fn e2e_nested_message_with_oneof() {
    let out = env().proto_to_table("Part", None).unwrap();
    let expected = "\
A piece of content.

| Field   | Type     | Required         | Description      |
|---------|----------|------------------|------------------|
| `text`  | `string` | Optional (OneOf) | Plain text.      |
| `raw`   | `bytes`  | Optional (OneOf) | Raw bytes.       |
| `data`  | `any`    | Optional (OneOf) | Structured data. |

**Note:** A `Part` MUST contain exactly one of the following: `text`, `raw`, `data`";
    assert_eq!(out, expected);
}

#[test]
fn e2e_single_member_oneof_gets_no_note() {
    let out = env().proto_to_table("SendMessageRequest", None).unwrap();
    assert!(out.starts_with("Sent by a client to start work.\n\n"));
    assert!(out.contains("| `agentName` "));
    assert!(out.ends_with(
        "\n\n**Note:** A `SendMessageRequest` MUST contain exactly one of the following: `text`, `artifact`"
    ));
    assert_eq!(out.matches("**Note:**").count(), 1);
}

#[test]
fn e2e_message_edge_cases() {
    let env = env();
    assert_eq!(env.proto_to_table("Empty", None).unwrap(), "None");
    assert_eq!(
        env.proto_to_table("Bogus", None).unwrap(),
        "**Error:** Message `Bogus` not found."
    );
    assert_eq!(
        env.proto_to_table("Task", Some("specification/missing.proto")).unwrap(),
        "**Error:** Proto not found: specification/missing.proto"
    );
}

#[test]
fn e2e_enum_table() {
    let out = env().proto_enum_to_table("TaskState", None);
    let expected = "\
Lifecycle state of a task.

| Value                    | Description                              |
|--------------------------|------------------------------------------|
| `TASK_STATE_UNSPECIFIED` |                                          |
| `TASK_STATE_SUBMITTED`   | Work has been submitted.                 |
| `TASK_STATE_WORKING`     | Work is in progress. Updates may follow. |";
    assert_eq!(out, expected);
    assert_eq!(
        env().proto_enum_to_table("Task", None),
        "**Error:** Enum `Task` not found."
    );
}

#[test]
fn e2e_service_table() {
    let out = env().proto_service_to_table("A2AService", None);
    let expected = "\
| Method                 | Request                                     | Response               | Description                   |
|------------------------|---------------------------------------------|------------------------|-------------------------------|
| `SendMessage`          | [`SendMessageRequest`](#sendmessagerequest) | [`Task`](#task)        | Sends a message to the agent. |
| `SendStreamingMessage` | [`SendMessageRequest`](#sendmessagerequest) | stream [`Task`](#task) | Streams task updates.         |
| `GetTask`              | [`GetTaskRequest`](#gettaskrequest)         | `empty`                |                               |";
    assert_eq!(out, expected);
    assert_eq!(env().proto_service_to_table("Idle", None), "None");
}

#[test]
fn e2e_config_from_mkdocs_file() {
    let config = DocsConfig::from_mkdocs_file("tests/resources/mkdocs.yml").unwrap();
    let env = DocsEnv::new(config);
    let out = env.proto_to_table("Task", None).unwrap();
    assert!(out.starts_with("A unit of work tracked by the agent."));
}

#[test]
fn e2e_parse_errors_propagate_from_message_renderer() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.proto"), "message Broken {").unwrap();
    let env = DocsEnv::new(DocsConfig::new(dir.path().join("docs")));

    let result = env.proto_to_table("Broken", Some("broken.proto"));
    assert!(matches!(result, Err(GenerateError::Parse(_))));
    assert!(env
        .proto_service_to_table("Broken", Some("broken.proto"))
        .starts_with("**Error:** "));
}
