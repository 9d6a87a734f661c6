use flow_core::model::{Course, LessonId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub lesson_id: LessonId,
    pub title: String,
    pub description: String,
    pub level: String,
    pub progress_percent: u32,
    pub progress_label: String,
    pub duration: String,
    pub difficulty: String,
    pub topics: Vec<String>,
    pub action_label: &'static str,
}

impl CourseCardVm {
    #[must_use]
    pub fn from_course(course: &Course) -> Self {
        Self {
            lesson_id: course.id().lesson_id(),
            title: course.title().to_owned(),
            description: course.description().to_owned(),
            level: course.level().to_string(),
            progress_percent: course.progress_percent(),
            progress_label: format!("{}/{} lessons", course.completed(), course.lessons()),
            duration: course.duration().to_owned(),
            difficulty: course.difficulty().to_owned(),
            topics: course.topics().to_vec(),
            action_label: if course.is_started() {
                "Continue"
            } else {
                "Start"
            },
        }
    }
}

#[must_use]
pub fn map_course_cards(courses: &[Course]) -> Vec<CourseCardVm> {
    courses.iter().map(CourseCardVm::from_course).collect()
}
