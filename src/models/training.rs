//! Built-in exercise library shown next to the screening flow.
//!
//! Titles and descriptions are localization keys; resolving them is the
//! presentation layer's job.

use serde::Serialize;

/// One exercise: localization keys plus bundled media names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingItem {
    pub title_key: &'static str,
    pub image_name: &'static str,
    pub video_name: &'static str,
    pub description_key: &'static str,
}

/// A titled group of exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingSection {
    pub title_key: &'static str,
    pub items: &'static [TrainingItem],
}

static SECTIONS: &[TrainingSection] = &[
    TrainingSection {
        title_key: "for_brain_key",
        items: &[TrainingItem {
            title_key: "training_mind_title_key",
            image_name: "trainForMindImage",
            video_name: "trainMind.mp4",
            description_key: "mind_train_description_key",
        }],
    },
    TrainingSection {
        title_key: "for_fine_motor_skills_key",
        items: &[
            TrainingItem {
                title_key: "prayer_stretch_title_key",
                image_name: "trainingFineImage",
                video_name: "trainingFingers.mp4",
                description_key: "prayer_stretch_description_key",
            },
            TrainingItem {
                title_key: "open_hand_spreads_title_key",
                image_name: "trainingFineImage",
                video_name: "trainingFingers2.mp4",
                description_key: "open_hand_spreads_description_key",
            },
            TrainingItem {
                title_key: "finger_flipping_title_key",
                image_name: "trainingFineImage",
                video_name: "trainingFingers3.mp4",
                description_key: "finger_flipping_description_key",
            },
        ],
    },
    TrainingSection {
        title_key: "for_body_key",
        items: &[TrainingItem {
            title_key: "training_walking_body_title_key",
            image_name: "trainingWalkingImage",
            video_name: "trainingwalking.mp4",
            description_key: "training_walking_body_description_key",
        }],
    },
];

/// All sections, in display order.
pub fn sections() -> &'static [TrainingSection] {
    SECTIONS
}

/// Look up an exercise by its bundled video file name.
pub fn find_by_video(video_name: &str) -> Option<&'static TrainingItem> {
    SECTIONS
        .iter()
        .flat_map(|section| section.items.iter())
        .find(|item| item.video_name == video_name)
}
