/// Returned when the resume covers every skill the JD asks for.
pub const ENCOURAGEMENT: &str =
    "Your resume already covers most of the required skills. Keep learning and building projects!";

pub const IMPROVEMENT_TIPS: &[&str] = &[
    "Work on real-world projects and upload them to GitHub.",
    "Earn certifications (AWS, Azure, Tableau, etc.).",
    "Practice coding challenges on platforms like LeetCode/HackerRank.",
    "Build a strong LinkedIn profile highlighting your skills.",
    "Stay updated with latest technologies and frameworks.",
];

/// Builds the human-readable advice block shown under the result.
pub fn build_suggestions(missing_skills: &[String]) -> String {
    if missing_skills.is_empty() {
        return ENCOURAGEMENT.to_string();
    }

    let tips: Vec<String> = IMPROVEMENT_TIPS.iter().map(|t| format!("- {t}")).collect();
    format!(
        "Improve your skills in: {}.\n\nAdditional tips to boost your profile:\n{}",
        missing_skills.join(", "),
        tips.join("\n")
    )
}
