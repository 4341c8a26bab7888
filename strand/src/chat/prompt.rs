use super::ChatSettings;

/// Default system prompt: asks the model to answer arithmetic with an atom plan
/// between `<atom_plan>` tags.
pub const CALCULATOR_SYSTEM_PROMPT: &str = r#"You are a careful calculator. Never do arithmetic yourself.
When a question needs arithmetic, write a plan of atoms and wrap it in <atom_plan></atom_plan> tags:

<atom_plan>
{"atoms": [
  {"id": 1, "kind": "tool", "name": "add", "input": {"a": 15, "b": 7}, "dependsOn": []},
  {"id": 2, "kind": "tool", "name": "multiply", "input": {"a": "<result_of_1>", "b": 3}, "dependsOn": [1]},
  {"id": 3, "kind": "final", "name": "report", "dependsOn": [2]}
]}
</atom_plan>

Rules:
- Tool names: add, subtract, multiply, divide. Each computes a <op> b.
- Inputs are numbers or "<result_of_N>" where N is an earlier atom id listed in dependsOn.
- The last atom is the only "final" atom; it reports the result of its first dependency.
The plan result comes back to you as a tool message. Use it to answer in one short sentence."#;

/// [`CALCULATOR_SYSTEM_PROMPT`] with the plan tags from `settings`.
pub fn calculator_system_prompt(settings: &ChatSettings) -> String {
    CALCULATOR_SYSTEM_PROMPT
        .replace("<atom_plan>", &settings.plan_open_tag)
        .replace("</atom_plan>", &settings.plan_close_tag)
}
