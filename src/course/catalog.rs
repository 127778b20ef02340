// --- Static Definitions ---

#[derive(Debug)]
pub struct Lesson {
    pub number: u32,
    pub title: &'static str,
    pub topics: &'static [&'static str],
}

pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub lessons: &'static [u32],
}

pub struct Resource {
    pub category: &'static str,
    pub entries: &'static [&'static str],
}

pub const ALL_LESSONS: &[Lesson] = &[
    Lesson { number: 1, title: "Introduction to HTML", topics: &["html", "basics", "structure"] },
    Lesson { number: 2, title: "HTML Document Structure", topics: &["doctype", "head", "body"] },
    Lesson { number: 3, title: "Text Elements", topics: &["paragraphs", "headings", "formatting"] },
    Lesson { number: 4, title: "Links and Navigation", topics: &["links", "anchors", "navigation"] },
    Lesson { number: 5, title: "Images and Media", topics: &["images", "media", "multimedia"] },
    Lesson { number: 6, title: "Lists and Tables", topics: &["lists", "tables", "data"] },
    Lesson { number: 7, title: "Forms and Input", topics: &["forms", "input", "validation"] },
    Lesson { number: 8, title: "Semantic Elements", topics: &["semantic", "html5", "structure"] },
    Lesson { number: 9, title: "HTML5 Features", topics: &["html5", "modern", "features"] },
    Lesson { number: 10, title: "Audio and Video", topics: &["audio", "video", "multimedia"] },
    Lesson { number: 11, title: "Canvas and SVG", topics: &["canvas", "svg", "graphics"] },
    Lesson { number: 12, title: "Web APIs", topics: &["apis", "geolocation", "storage"] },
    Lesson { number: 13, title: "Accessibility", topics: &["accessibility", "a11y", "inclusive"] },
    Lesson { number: 14, title: "Performance", topics: &["performance", "optimization", "speed"] },
    Lesson { number: 15, title: "Best Practices", topics: &["best practices", "standards", "modern"] },
];

pub const ALL_PROJECTS: &[Project] = &[
    Project {
        title: "Personal Profile Page",
        description: "Headings, paragraphs, links and an image in one well-formed document",
        lessons: &[1, 2, 3, 4, 5],
    },
    Project {
        title: "Recipe Collection",
        description: "Ordered and unordered lists plus a nutrition table",
        lessons: &[3, 6],
    },
    Project {
        title: "Event Registration Form",
        description: "Inputs, labels and native validation for a signup flow",
        lessons: &[7, 13],
    },
    Project {
        title: "Media Gallery",
        description: "Responsive images, audio and video with captions",
        lessons: &[5, 10, 11],
    },
    Project {
        title: "Semantic Blog Layout",
        description: "Header, nav, article and footer landmarks tuned for speed",
        lessons: &[8, 9, 14, 15],
    },
];

pub const ALL_RESOURCES: &[Resource] = &[
    Resource {
        category: "References",
        entries: &["MDN HTML element reference", "WHATWG HTML Living Standard"],
    },
    Resource {
        category: "Validation",
        entries: &["W3C Markup Validation Service", "axe accessibility checker"],
    },
    Resource {
        category: "Tooling",
        entries: &["Browser developer tools", "Lighthouse performance audits"],
    },
];

pub fn total_lessons() -> u32 {
    ALL_LESSONS.len() as u32
}

pub fn find_lesson(number: u32) -> Option<&'static Lesson> {
    ALL_LESSONS.iter().find(|l| l.number == number)
}

impl Lesson {
    /// Zero-based position of this lesson's card in the lessons panel.
    pub fn card_index(&self) -> usize {
        (self.number - 1) as usize
    }
}
