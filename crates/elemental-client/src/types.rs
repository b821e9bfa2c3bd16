//! XML request and response types for the Elemental Conductor API.
//!
//! Request types ([`Job`] and its parts) serialize into the exact element
//! layout Conductor expects. Response types are deliberately lenient: every
//! field is optional or defaulted and unknown elements are ignored, since a
//! job fetched by id can carry far more than the subset modelled here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Job submission
// ---------------------------------------------------------------------------

/// A transcoding job as submitted to `POST /api/jobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "job")]
pub struct Job {
    pub input: Input,
    pub priority: u32,
    pub output_group: OutputGroup,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stream_assembly: Vec<StreamAssembly>,
}

/// Where the job reads its source media from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Input {
    pub file_input: Location,
}

/// A URI together with the credentials Conductor uses to access it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub uri: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

/// A group of outputs written to a common destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputGroup {
    pub order: u32,
    pub file_group_settings: FileGroupSettings,
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<Output>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileGroupSettings {
    pub destination: Location,
}

/// A single output file, bound to a stream assembly by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Output {
    pub stream_assembly_name: String,
    pub name_modifier: String,
    pub order: u32,
    pub extension: String,
}

/// Binds a named stream to the preset that encodes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamAssembly {
    pub name: String,
    pub preset: String,
}

// ---------------------------------------------------------------------------
// Job responses
// ---------------------------------------------------------------------------

/// The subset of a `<job>` response needed to track a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobInfo {
    #[serde(rename = "@href")]
    pub href: Option<String>,
    pub status: Option<String>,
    pub pct_complete: Option<u32>,
    pub submitted: Option<String>,
    pub error_messages: Option<JobErrorMessages>,
}

impl JobInfo {
    /// Job identifier, taken from the last segment of the `href` attribute
    /// (`/jobs/42` -> `42`).
    pub fn id(&self) -> Option<&str> {
        self.href.as_deref().and_then(href_id)
    }

    /// Human readable error messages reported for a failed job.
    pub fn error_messages(&self) -> Vec<String> {
        self.error_messages
            .as_ref()
            .map(|m| m.errors.iter().map(|e| e.message.clone()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobErrorMessages {
    #[serde(rename = "error")]
    pub errors: Vec<JobError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobError {
    pub code: Option<i64>,
    pub message: String,
}

/// Body sent to `POST /api/jobs/{id}/cancel`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename = "cancel")]
pub(crate) struct Cancel {}

// ---------------------------------------------------------------------------
// Presets and nodes
// ---------------------------------------------------------------------------

/// Response of `GET /api/presets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PresetList {
    #[serde(rename = "preset")]
    pub presets: Vec<Preset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preset {
    #[serde(rename = "@href")]
    pub href: Option<String>,
    pub name: String,
    pub permalink: Option<String>,
    pub description: Option<String>,
    pub container: Option<String>,
}

impl Preset {
    /// Preset identifier, taken from the last segment of the `href`
    /// attribute (`/presets/15` -> `15`).
    pub fn id(&self) -> Option<&str> {
        self.href.as_deref().and_then(href_id)
    }
}

/// Response of `GET /api/nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeList {
    #[serde(rename = "node")]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Node {
    #[serde(rename = "@href")]
    pub href: Option<String>,
    pub name: String,
    pub hostname: Option<String>,
    pub status: Option<String>,
    pub product: Option<String>,
}

/// Error body returned alongside non-success status codes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiErrors {
    #[serde(rename = "error")]
    pub messages: Vec<String>,
}

/// Last non-empty segment of a resource `href`.
fn href_id(href: &str) -> Option<&str> {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job {
            input: Input {
                file_input: Location {
                    uri: "http://some.nice/video.mov".into(),
                    username: "access".into(),
                    password: "secret".into(),
                },
            },
            priority: 50,
            output_group: OutputGroup {
                order: 1,
                file_group_settings: FileGroupSettings {
                    destination: Location {
                        uri: "s3://destination/video".into(),
                        username: "access".into(),
                        password: "secret".into(),
                    },
                },
                group_type: "file_group_settings".into(),
                output: vec![Output {
                    stream_assembly_name: "stream_0".into(),
                    name_modifier: "_15".into(),
                    order: 0,
                    extension: ".mp4".into(),
                }],
            },
            stream_assembly: vec![StreamAssembly {
                name: "stream_0".into(),
                preset: "15".into(),
            }],
        }
    }

    #[test]
    fn job_serializes_with_conductor_element_names() {
        let xml = quick_xml::se::to_string(&sample_job()).unwrap();
        assert!(xml.starts_with("<job>"));
        assert!(xml.contains(
            "<file_input><uri>http://some.nice/video.mov</uri><username>access</username><password>secret</password></file_input>"
        ));
        assert!(xml.contains("<priority>50</priority>"));
        assert!(xml.contains("<type>file_group_settings</type>"));
        assert!(xml.contains(
            "<output><stream_assembly_name>stream_0</stream_assembly_name><name_modifier>_15</name_modifier><order>0</order><extension>.mp4</extension></output>"
        ));
        assert!(xml.contains("<stream_assembly><name>stream_0</name><preset>15</preset></stream_assembly>"));
    }

    #[test]
    fn location_without_credentials_omits_them() {
        let mut job = sample_job();
        job.input.file_input.username.clear();
        job.input.file_input.password.clear();
        let xml = quick_xml::se::to_string(&job).unwrap();
        assert!(xml.contains("<file_input><uri>http://some.nice/video.mov</uri></file_input>"));
    }

    #[test]
    fn job_info_parses_running_job() {
        let xml = r#"<job href="/jobs/42" product="Elemental Conductor" version="2.7">
            <input><file_input><uri>http://some.nice/video.mov</uri></file_input></input>
            <priority>50</priority>
            <submitted>2016-01-20 17:13:54 -0500</submitted>
            <status>running</status>
            <pct_complete>37</pct_complete>
            <output_group><order>1</order></output_group>
            <output_group><order>2</order></output_group>
        </job>"#;
        let info: JobInfo = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(info.id(), Some("42"));
        assert_eq!(info.status.as_deref(), Some("running"));
        assert_eq!(info.pct_complete, Some(37));
        assert_eq!(info.submitted.as_deref(), Some("2016-01-20 17:13:54 -0500"));
        assert!(info.error_messages().is_empty());
    }

    #[test]
    fn job_info_collects_error_messages() {
        let xml = r#"<job href="/jobs/7">
            <status>error</status>
            <error_messages>
                <error><code>1040</code><message>Failed to open input</message></error>
                <error><message>Encoder aborted</message></error>
            </error_messages>
        </job>"#;
        let info: JobInfo = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(
            info.error_messages(),
            vec!["Failed to open input".to_string(), "Encoder aborted".to_string()]
        );
        assert_eq!(info.error_messages.unwrap().errors[0].code, Some(1040));
    }

    #[test]
    fn job_id_requires_href() {
        assert_eq!(JobInfo::default().id(), None);
        let info = JobInfo {
            href: Some("/".into()),
            ..Default::default()
        };
        assert_eq!(info.id(), None);
    }

    #[test]
    fn ids_ignore_trailing_slash() {
        let info = JobInfo {
            href: Some("/jobs/42/".into()),
            ..Default::default()
        };
        assert_eq!(info.id(), Some("42"));

        let preset = Preset {
            href: Some("/presets/15/".into()),
            ..Default::default()
        };
        assert_eq!(preset.id(), Some("15"));
        assert_eq!(Preset::default().id(), None);
    }

    #[test]
    fn preset_list_parses() {
        let xml = r#"<preset_list>
            <preset href="/presets/15"><name>iPhone</name><permalink>iphone</permalink><container>mp4</container></preset>
            <preset href="/presets/20"><name>webm_720p</name></preset>
        </preset_list>"#;
        let list: PresetList = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(list.presets.len(), 2);
        assert_eq!(list.presets[0].name, "iPhone");
        assert_eq!(list.presets[0].container.as_deref(), Some("mp4"));
        assert_eq!(list.presets[1].href.as_deref(), Some("/presets/20"));
    }

    #[test]
    fn api_errors_parse() {
        let xml = "<errors><error>Preset not found</error><error>Input is required</error></errors>";
        let errors: ApiErrors = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(errors.messages, vec!["Preset not found", "Input is required"]);
    }
}
