//! Bundled catalog content and sample lessons.

use chrono::{DateTime, NaiveDate, Utc};
use flow_core::model::{
    Achievement, Course, CourseId, ForumTopic, Goal, LessonHistoryEntry, LessonId, Level,
    MediaRef, PracticeActivity, Question, QuestionId, QuestionKind, SpeakingClub,
};
use std::collections::HashMap;

use crate::memory::CatalogData;
use crate::repository::StorageError;

fn invalid(e: impl std::fmt::Display) -> StorageError {
    StorageError::InvalidContent(e.to_string())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, StorageError> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| invalid(format!("bad date {y}-{m}-{d}")))
}

/// All bundled content.
///
/// # Errors
///
/// Returns `StorageError::InvalidContent` if any bundled record fails validation.
pub fn bundled() -> Result<CatalogData, StorageError> {
    let courses = courses()?;
    let mut lessons = HashMap::new();
    for course in &courses {
        let bank = match course.level() {
            Level::A1 | Level::A2 => starter_questions()?,
            _ => intermediate_questions()?,
        };
        lessons.insert(course.id().lesson_id(), bank);
    }
    let activities = practice_activities()?;
    for activity in &activities {
        let Some(lesson_id) = &activity.lesson else {
            continue;
        };
        let bank = match activity.id.as_str() {
            "listening" => starter_questions()?,
            "writing" => writing_questions()?,
            _ => intermediate_questions()?,
        };
        lessons.insert(lesson_id.clone(), bank);
    }

    Ok(CatalogData {
        courses,
        lessons,
        activities,
        clubs: speaking_clubs(),
        topics: forum_topics(),
        achievements: default_achievements()?,
        history: recent_lessons()?,
        goals: current_goals(),
    })
}

#[allow(clippy::too_many_arguments)]
fn course(
    id: &str,
    level: Level,
    title: &str,
    description: &str,
    lessons: u32,
    completed: u32,
    duration: &str,
    difficulty: &str,
    topics: &[&str],
) -> Result<Course, StorageError> {
    Course::new(
        CourseId::new(id).map_err(invalid)?,
        level,
        title,
        description,
        lessons,
        completed,
        duration,
        difficulty,
        strings(topics),
    )
    .map_err(invalid)
}

fn courses() -> Result<Vec<Course>, StorageError> {
    Ok(vec![
        course(
            "a1-basics",
            Level::A1,
            "English basics",
            "Alphabet, pronunciation, basic phrases",
            12,
            8,
            "2 weeks",
            "Easy",
            &["Alphabet", "Pronunciation", "Greetings", "Numbers"],
        )?,
        course(
            "a1-grammar",
            Level::A1,
            "Basic grammar",
            "Present Simple, articles, pronouns",
            15,
            3,
            "3 weeks",
            "Easy",
            &["Present Simple", "Articles", "Pronouns", "Questions"],
        )?,
        course(
            "b1-conversations",
            Level::B1,
            "Conversation practice",
            "Dialogues on everyday topics",
            20,
            12,
            "4 weeks",
            "Medium",
            &["Work", "Hobbies", "Travel", "Food"],
        )?,
        course(
            "b1-business",
            Level::B1,
            "Business English",
            "Communicating in a professional setting",
            18,
            0,
            "5 weeks",
            "Medium",
            &["Presentations", "Negotiations", "Email", "Meetings"],
        )?,
    ])
}

fn starter_questions() -> Result<Vec<Question>, StorageError> {
    let audio = MediaRef::parse("/audio/sample.mp3").map_err(invalid)?;
    let questions = vec![
        Question::new(
            QuestionId::new(1),
            QuestionKind::SingleChoice,
            r#"What is the correct form of the verb "to be" for "I"?"#,
            strings(&["am", "is", "are", "be"]),
            "am",
        )
        .map_err(invalid)?
        .with_explanation(r#"For the first person singular "I", we always use "am"."#),
        Question::new(
            QuestionId::new(2),
            QuestionKind::FillBlank,
            r#"Complete the sentence: "She _____ a teacher.""#,
            Vec::new(),
            "is",
        )
        .map_err(invalid)?
        .with_explanation(r#"For third person singular (she/he/it), we use "is"."#),
        Question::new(
            QuestionId::new(3),
            QuestionKind::SingleChoice,
            r#"Which word means "семья" in English?"#,
            strings(&["house", "family", "home", "people"]),
            "family",
        )
        .map_err(invalid)?
        .with_explanation("Family means семья in Russian."),
        Question::new(
            QuestionId::new(4),
            QuestionKind::AudioChoice,
            "Listen to the audio and choose the correct answer: What did she say?",
            strings(&[
                "Hello, how are you?",
                "Hi, what are you doing?",
                "Hey, where are you?",
                "Hello, who are you?",
            ]),
            "Hello, how are you?",
        )
        .map_err(invalid)?
        .with_audio(audio)
        .validated()
        .map_err(invalid)?,
    ];
    Ok(questions)
}

fn intermediate_questions() -> Result<Vec<Question>, StorageError> {
    Ok(vec![
        Question::new(
            QuestionId::new(1),
            QuestionKind::SingleChoice,
            "I _____ here since 2019.",
            strings(&["live", "am living", "have lived", "lived"]),
            "have lived",
        )
        .map_err(invalid)?
        .with_explanation("Use Present Perfect for a state that started in the past and continues."),
        Question::new(
            QuestionId::new(2),
            QuestionKind::FillBlank,
            r#"Complete the sentence: "If it rains, we _____ stay at home.""#,
            Vec::new(),
            "will",
        )
        .map_err(invalid)?
        .with_explanation("The first conditional uses will + infinitive in the main clause."),
        Question::new(
            QuestionId::new(3),
            QuestionKind::SingleChoice,
            r#"Choose the best reply to "Could you send me the report?""#,
            strings(&["Sure, I'll do it now.", "Yes, I could.", "No, thanks.", "I'm fine."]),
            "Sure, I'll do it now.",
        )
        .map_err(invalid)?,
        Question::new(
            QuestionId::new(4),
            QuestionKind::FillBlank,
            r#"Complete the sentence: "She is interested _____ art.""#,
            Vec::new(),
            "in",
        )
        .map_err(invalid)?
        .with_explanation(r#""Interested" is followed by the preposition "in"."#),
    ])
}

fn writing_questions() -> Result<Vec<Question>, StorageError> {
    let blank = |id, prompt: &str, answer: &str, explanation: &str| {
        Question::new(QuestionId::new(id), QuestionKind::FillBlank, prompt, Vec::new(), answer)
            .map(|q| q.with_explanation(explanation))
            .map_err(invalid)
    };
    Ok(vec![
        blank(
            1,
            r#"Complete the sentence: "Dear Sir or _____,""#,
            "Madam",
            "Formal letters to an unknown reader open with \"Dear Sir or Madam\".",
        )?,
        blank(
            2,
            r#"Complete the sentence: "I look forward _____ hearing from you.""#,
            "to",
            r#""Look forward" is followed by "to" and an -ing form."#,
        )?,
        blank(
            3,
            r#"Complete the sentence: "Yours _____,""#,
            "sincerely",
            r#"Close with "Yours sincerely" when you know the reader's name."#,
        )?,
    ])
}

fn activity(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    lesson: Option<&str>,
) -> Result<PracticeActivity, StorageError> {
    Ok(PracticeActivity {
        id: id.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
        lesson: lesson.map(LessonId::new).transpose().map_err(invalid)?,
    })
}

fn practice_activities() -> Result<Vec<PracticeActivity>, StorageError> {
    Ok(vec![
        activity(
            "speaking",
            "Speaking practice",
            "An AI assistant to improve your pronunciation",
            "Mic",
            None,
        )?,
        activity(
            "listening",
            "Listening",
            "Understanding speech by ear",
            "Headphones",
            Some("practice-listening"),
        )?,
        activity(
            "writing",
            "Writing practice",
            "Essays and compositions with review",
            "PenTool",
            Some("practice-writing"),
        )?,
        activity(
            "grammar",
            "Grammar tests",
            "Reinforce the rules of grammar",
            "BookOpen",
            Some("practice-grammar"),
        )?,
    ])
}

fn speaking_clubs() -> Vec<SpeakingClub> {
    let club = |title: &str, time: &str, participants, min_level, max_level| SpeakingClub {
        title: title.to_owned(),
        time: time.to_owned(),
        participants,
        min_level,
        max_level,
    };
    vec![
        club("Beginner Speaking Club", "18:00", 8, Level::A1, Level::A2),
        club("Travel Conversations", "19:30", 12, Level::B1, Level::B2),
        club("Business English Club", "20:00", 6, Level::B2, Level::C1),
    ]
}

fn forum_topics() -> Vec<ForumTopic> {
    let topic = |title: &str, author: &str, replies, posted: &str| ForumTopic {
        title: title.to_owned(),
        author: author.to_owned(),
        replies,
        posted: posted.to_owned(),
    };
    vec![
        topic("How to improve pronunciation?", "Anna K.", 15, "2 hours ago"),
        topic("Best apps for learning", "Mikhail S.", 8, "5 hours ago"),
        topic("Preparing for IELTS", "Elena P.", 23, "1 day ago"),
    ]
}

fn earned_at(day: NaiveDate) -> Result<DateTime<Utc>, StorageError> {
    day.and_hms_opt(12, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| invalid("bad achievement timestamp"))
}

fn default_achievements() -> Result<Vec<Achievement>, StorageError> {
    let achievement = |id: &str, title: &str, description: &str, icon: &str, day| {
        Ok::<_, StorageError>(Achievement {
            id: id.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            icon: icon.to_owned(),
            earned_at: earned_at(day)?,
        })
    };
    Ok(vec![
        achievement("1", "First steps", "Completed your first lesson", "Star", date(2024, 7, 1)?)?,
        achievement("2", "Persistence", "7 days of study in a row", "Flame", date(2024, 7, 8)?)?,
        achievement(
            "3",
            "Grammar expert",
            "Finished 10 grammar lessons",
            "BookOpen",
            date(2024, 7, 10)?,
        )?,
    ])
}

fn recent_lessons() -> Result<Vec<LessonHistoryEntry>, StorageError> {
    let entry = |title: &str, category: &str, progress, day| LessonHistoryEntry {
        title: title.to_owned(),
        category: category.to_owned(),
        progress,
        date: day,
    };
    Ok(vec![
        entry("Present Simple", "Grammar", 100, date(2024, 7, 10)?),
        entry("Family Vocabulary", "Vocabulary", 75, date(2024, 7, 9)?),
        entry("Daily Conversations", "Speaking practice", 60, date(2024, 7, 8)?),
        entry("Pronunciation Practice", "Pronunciation", 90, date(2024, 7, 7)?),
    ])
}

fn current_goals() -> Vec<Goal> {
    let goal = |title: &str, current, total| Goal {
        title: title.to_owned(),
        current,
        total,
    };
    vec![
        goal("Complete 5 lessons this week", 3, 5),
        goal("Study 30 minutes a day", 24, 30),
        goal("Learn 50 new words", 20, 50),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_is_valid() {
        let data = bundled().unwrap();
        assert_eq!(data.courses.len(), 4);
        assert_eq!(data.activities.len(), 4);
        assert_eq!(data.clubs.len(), 3);
        assert_eq!(data.topics.len(), 3);
        assert_eq!(data.achievements.len(), 3);
        assert_eq!(data.history.len(), 4);
        assert_eq!(data.goals.len(), 3);
    }

    #[test]
    fn every_course_has_a_lesson() {
        let data = bundled().unwrap();
        for course in &data.courses {
            let questions = data.lessons.get(&course.id().lesson_id()).unwrap();
            assert_eq!(questions.len(), 4, "{:?}", course.id());
        }
    }

    #[test]
    fn starter_lesson_covers_three_kinds() {
        let questions = starter_questions().unwrap();
        let kinds: Vec<_> = questions.iter().map(Question::kind).collect();
        assert!(kinds.contains(&QuestionKind::SingleChoice));
        assert!(kinds.contains(&QuestionKind::FillBlank));
        assert!(kinds.contains(&QuestionKind::AudioChoice));
    }

    #[test]
    fn available_activities_have_lessons() {
        let data = bundled().unwrap();
        for activity in data.activities.iter().filter(|a| a.is_available()) {
            let lesson_id = activity.lesson.as_ref().unwrap();
            assert!(!data.lessons[lesson_id].is_empty(), "{}", activity.id);
        }
    }

    #[test]
    fn speaking_practice_is_not_ready_yet() {
        let data = bundled().unwrap();
        let speaking = data.activities.iter().find(|a| a.id == "speaking").unwrap();
        assert!(!speaking.is_available());
        assert_eq!(data.activities.iter().filter(|a| a.is_available()).count(), 3);
    }
}
