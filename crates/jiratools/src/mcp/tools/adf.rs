//! ADF conversion tools. These never touch the network.

use jiratools_core::adf;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{json_result, parse_arguments, text_result, JsonRpcError, Tool};

pub fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "adf_render".to_string(),
            description: "Render an Atlassian Document Format value as Markdown or plain text. Accepts a full document, a single node, or a legacy plain-text string. Unknown node types degrade to their text content.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "value": {
                        "description": "ADF document, ADF node, or plain string"
                    },
                    "format": {
                        "type": "string",
                        "description": "Output format (default: markdown)",
                        "enum": ["markdown", "text"]
                    }
                },
                "required": ["value"]
            }),
        },
        Tool {
            name: "adf_from_text".to_string(),
            description: "Build an ADF document from plain text. Blank lines separate paragraphs. Returns null when the text is blank.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Plain text to convert"
                    }
                },
                "required": ["text"]
            }),
        },
        Tool {
            name: "adf_normalize".to_string(),
            description: "Normalize any accepted rich-text value (document, bare node, legacy string) into a canonical ADF document. Returns null for absent or unrecognized input.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "value": {
                        "description": "ADF document, ADF node, or plain string"
                    }
                },
                "required": ["value"]
            }),
        },
    ]
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum RenderFormat {
    #[default]
    Markdown,
    Text,
}

pub fn handle_adf_render(arguments: Option<Value>) -> Result<Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct AdfRenderArgs {
        value: Option<Value>,
        #[serde(default)]
        format: RenderFormat,
    }

    let args: AdfRenderArgs = parse_arguments(arguments)?;

    let output = match args.format {
        RenderFormat::Markdown => adf::render(args.value.as_ref()),
        RenderFormat::Text => adf::extract_plain_text(args.value.as_ref()),
    };

    text_result(output)
}

pub fn handle_adf_from_text(arguments: Option<Value>) -> Result<Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct AdfFromTextArgs {
        text: String,
    }

    let args: AdfFromTextArgs = parse_arguments(arguments)?;

    json_result(&adf::text_to_document(&args.text))
}

pub fn handle_adf_normalize(arguments: Option<Value>) -> Result<Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct AdfNormalizeArgs {
        value: Option<Value>,
    }

    let args: AdfNormalizeArgs = parse_arguments(arguments)?;

    json_result(&adf::normalize(args.value.as_ref()))
}
