use serde::{Deserialize, Serialize};

/// Messages accepted by the render side. The control side only ever sends
/// scalar parameter updates and small flags, never sample data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlMessage {
    SetParameter { name: String, value: f32 },
    Enable { enabled: bool },
    SetTickInterval { seconds: f32 },
}

/// Messages emitted by the render side: the periodic automation tick and
/// the block-level summary statistics that drive it. Never per-sample data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderMessage {
    Tick,
    #[serde(rename_all = "camelCase")]
    Measurement {
        channel_averages: Vec<f32>,
        frame_average: f32,
        running_average: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_messages_round_trip_as_tagged_json() {
        let message = ControlMessage::SetParameter {
            name: "feedback".into(),
            value: 0.5,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"type\":\"setParameter\""));
        assert_eq!(serde_json::from_str::<ControlMessage>(&json).unwrap(), message);

        let json = serde_json::to_string(&ControlMessage::Enable { enabled: true }).unwrap();
        assert!(json.contains("\"type\":\"enable\""));
    }

    #[test]
    fn measurement_serializes_with_camel_case_fields() {
        let message = RenderMessage::Measurement {
            channel_averages: vec![0.1, 0.2],
            frame_average: 0.15,
            running_average: 0.12,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("channelAverages"));
        assert!(json.contains("runningAverage"));
        assert_eq!(serde_json::from_str::<RenderMessage>(&json).unwrap(), message);
    }
}
