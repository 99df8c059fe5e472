// All LLM prompt templates for the analysis module.
// Placeholders are filled with `llm_client::prompts::render`.

/// Interview questions from a conversation context. Placeholders: `{context}`, `{job_description}`.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = "Conversation context with a candidate: {context}\n\
    Suggest several questions I can ask this candidate to find out whether they are \
    the best match for the following role.\n\
    Job description: {job_description}\n\
    Questions:";

/// Job description summary. Placeholder: `{job_description}`.
pub const JOB_SUMMARY_PROMPT_TEMPLATE: &str = "Job description: {job_description}\n\
    List the years of experience, programming languages, technology tools and skills \
    this job description asks for.";

/// CV summary. Placeholder: `{cv}`.
pub const CV_SUMMARY_PROMPT_TEMPLATE: &str = "CV: {cv}\n\
    List the years of experience, programming languages, technology tools and skills \
    this CV shows.";

/// Comparison report. Placeholders: `{job_summary}`, `{cv_summary}`.
pub const COMPARISON_PROMPT_TEMPLATE: &str = "Job requirements:\n{job_summary}\n\n\
    Candidate CV:\n{cv_summary}\n\n\
    Write a detailed highlight report of how the years of experience, programming \
    languages, technology tools and skills required by the job match the candidate's \
    experience as shown in the CV. Finish with an overall match accuracy as a percentage.";
