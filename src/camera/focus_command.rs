//! `[FOCUS:target]` markers embedded in assistant replies drive the camera.

use std::sync::LazyLock;

use bevy::ecs::message::Message;
use bevy::ecs::message::MessageReader;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use regex::Regex;

use crate::camera::controller::CameraCommand;
use crate::camera::controller::CameraPose;
use crate::catalog::NeoCatalog;
use crate::schedule::CameraSet;

static FOCUS_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[FOCUS:([^\]]+)\]").ok());

pub struct FocusCommandPlugin;

impl Plugin for FocusCommandPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AssistantReply>()
            .add_message::<FocusRequested>()
            .add_systems(Update, extract_focus_commands.in_set(CameraSet::Input))
            .add_systems(Update, route_focus_requests.in_set(CameraSet::Commands));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusCommand {
    Earth,
    Overview,
    /// A catalog object, matched by case-insensitive substring of its name
    Object(String),
}

impl FocusCommand {
    fn from_target(target: &str) -> Option<Self> {
        let target = target.trim();
        if target.is_empty() {
            return None;
        }
        Some(if target.eq_ignore_ascii_case("earth") {
            Self::Earth
        } else if target.eq_ignore_ascii_case("overview") {
            Self::Overview
        } else {
            Self::Object(target.to_string())
        })
    }
}

/// Free text from the assistant, possibly carrying focus markers.
#[derive(Message, Clone, Debug)]
pub struct AssistantReply(pub String);

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct FocusRequested(pub FocusCommand);

/// Every focus marker in `text`, in order of appearance.
pub fn parse_focus_commands(text: &str) -> Vec<FocusCommand> {
    let Some(marker) = FOCUS_MARKER.as_ref() else {
        return Vec::new();
    };
    marker
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .filter_map(|target| FocusCommand::from_target(target.as_str()))
        .collect()
}

/// `text` with every focus marker removed, trimmed for display.
pub fn strip_focus_commands(text: &str) -> String {
    FOCUS_MARKER.as_ref().map_or_else(
        || text.trim().to_string(),
        |marker| marker.replace_all(text, "").trim().to_string(),
    )
}

fn extract_focus_commands(
    mut replies: MessageReader<AssistantReply>,
    mut requests: MessageWriter<FocusRequested>,
) {
    for AssistantReply(text) in replies.read() {
        debug!("assistant: {}", strip_focus_commands(text));
        requests.write_batch(parse_focus_commands(text).into_iter().map(FocusRequested));
    }
}

fn route_focus_requests(
    mut requests: MessageReader<FocusRequested>,
    catalog: Option<Res<NeoCatalog>>,
    mut camera_commands: MessageWriter<CameraCommand>,
) {
    for FocusRequested(command) in requests.read() {
        let pose = match command {
            FocusCommand::Earth => CameraPose::earth_view(),
            FocusCommand::Overview => CameraPose::overview(),
            FocusCommand::Object(name) => {
                let Some(neo) = catalog.as_ref().and_then(|catalog| catalog.find(name)) else {
                    warn!("no catalog object matches focus target '{name}'");
                    continue;
                };
                debug!("focusing on {}", neo.name);
                CameraPose::framing(neo.world_position())
            },
        };
        camera_commands.write(CameraCommand::FocusPose(pose));
    }
}
