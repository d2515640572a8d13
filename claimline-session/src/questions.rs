//! The scripted intake question list.
//!
//! Categories feed the `user_responses` records; ids are stable because
//! stored answers reference them.

/// One scripted intake question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeQuestion {
    pub id: u32,
    pub text: &'static str,
    pub category: &'static str,
}

pub const INTAKE_QUESTIONS: &[IntakeQuestion] = &[
    IntakeQuestion {
        id: 1,
        text: "When did the accident happen? Please include the date and approximate time.",
        category: "incident",
    },
    IntakeQuestion {
        id: 2,
        text: "Where did the accident happen? A street address or intersection works best.",
        category: "incident",
    },
    IntakeQuestion {
        id: 3,
        text: "Which vehicles were involved? Please describe make, model, and color.",
        category: "vehicles",
    },
    IntakeQuestion {
        id: 4,
        text: "Do you have photos of the damage or the scene you can share?",
        category: "evidence",
    },
    IntakeQuestion {
        id: 5,
        text: "Was anyone injured? If so, please describe the injuries.",
        category: "injuries",
    },
    IntakeQuestion {
        id: 6,
        text: "Were the police called, and is there a police report number?",
        category: "police",
    },
    IntakeQuestion {
        id: 7,
        text: "What were the weather and road conditions at the time?",
        category: "conditions",
    },
    IntakeQuestion {
        id: 8,
        text: "Were there any witnesses? Please share their names or contact details.",
        category: "witnesses",
    },
    IntakeQuestion {
        id: 9,
        text: "Which insurance company covers your vehicle, and what is your policy number?",
        category: "insurance",
    },
    IntakeQuestion {
        id: 10,
        text: "Is there anything else about the accident you would like to add?",
        category: "summary",
    },
];

/// Look up a question by its stable id.
pub fn question_by_id(id: u32) -> Option<&'static IntakeQuestion> {
    INTAKE_QUESTIONS.iter().find(|question| question.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_resolvable() {
        for question in INTAKE_QUESTIONS {
            assert_eq!(question_by_id(question.id), Some(question));
        }
        let mut ids: Vec<u32> = INTAKE_QUESTIONS.iter().map(|q| q.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), INTAKE_QUESTIONS.len());
        assert!(question_by_id(999).is_none());
    }
}
