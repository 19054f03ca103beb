use serde_json::{Value, json};

pub fn image_response(data: &str, mime_type: Option<&str>) -> Value {
    let mut inline = json!({ "data": data });
    if let Some(mime_type) = mime_type {
        inline["mimeType"] = json!(mime_type);
    }
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [
                { "text": "Here is your vision." },
                { "inlineData": inline }
            ]}
        }]
    })
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] }
        }]
    })
}

pub fn json_response(value: &Value) -> Value {
    text_response(&value.to_string())
}

pub fn spread_json() -> Value {
    json!({
        "cards": [
            { "name": "The High Priestess", "interpretation": "Hidden knowledge.", "positionName": "Past" },
            { "name": "The Wheel of Fortune", "interpretation": "A turning point.", "positionName": "Present" },
            { "name": "The Sun", "interpretation": "Clarity arrives.", "positionName": "Future" }
        ],
        "overallInterpretation": "What was hidden turns toward the light."
    })
}

pub fn soulmate_json() -> Value {
    json!({
        "initials": "L.V.",
        "zodiac": "Libra sun, Scorpio moon",
        "aura": "Violet edged with gold",
        "personality": "Quietly fierce",
        "spiritualAlignment": "Drawn to water and stillness",
        "spiritAnimal": "Heron",
        "career": "Restorer of old instruments",
        "mission": "To mend what others discard",
        "timingLocation": "Late autumn, near a harbour",
        "meetingDetails": "A dropped glove, a shared umbrella",
        "pastLife": "Lighthouse keepers on opposite shores",
        "tarotCompatibility": "The Lovers beside the Star",
        "spiritualSymbols": "Repeating elevens, feathers on stairs",
        "conclusion": "Keep your lantern lit.",
        "visualDescription": "a tall figure with silver-streaked hair and a patient smile"
    })
}
