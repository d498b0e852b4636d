//! The `matcheval init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("matcheval.toml").exists() {
        println!("matcheval.toml already exists, skipping.");
    } else {
        std::fs::write("matcheval.toml", SAMPLE_CONFIG)?;
        println!("Created matcheval.toml");
    }

    std::fs::create_dir_all("data/vacancies")?;
    std::fs::create_dir_all("data/arena")?;
    std::fs::create_dir_all("data/subjects")?;

    write_if_missing("data/vacancies/demo_latin.csv", SAMPLE_VACANCIES_LATIN)?;
    write_if_missing("data/vacancies/Вакансии_демо.csv", SAMPLE_VACANCIES_CYRILLIC)?;
    write_if_missing("data/subjects/subjects.csv", SAMPLE_SUBJECTS)?;

    println!("\nNext steps:");
    println!("  1. Review matcheval.toml");
    println!("  2. Run: matcheval validate");
    println!("  3. Run: matcheval rate --surname You --username you --affiliation Somewhere");

    Ok(())
}

fn write_if_missing(path: &str, contents: &str) -> Result<()> {
    if std::path::Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, contents)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# matcheval configuration

# Source collections, one ;-delimited CSV per collection.
vacancies_dir = "data/vacancies"

# Rating ledgers, one CSV per collection. The MATCHEVAL_LEDGER_DIR
# environment variable overrides this at runtime.
ledger_dir = "data/arena"

# Reference subject vocabulary; subjects missing from it are highlighted.
vocabulary_dir = "data/subjects"

# How many records per collection enter one evaluation round.
evaluate_limit = 10

# Scores run from 1 to rating_scale inclusive.
rating_scale = 10

# Randomly swap which method lands on which side of the screen.
randomize_sides = true

# Column headers for the structured table.
result_headers = ["Course", "University"]

# 1-based sub-field indices extracted from the structured payload.
structured_fields = [2, 3]

# Column holding subject names in the vocabulary files.
subject_column = "Subject"
"#;

const SAMPLE_VACANCIES_LATIN: &str = r#"ID;Name;Description;KeySkills;SBERT;SBERT_LLM
1;Data Analyst;Reporting team, junior level;SQL, Excel;"CS=SQL|Databases|State University; Excel|Statistics|Tech Institute";"Databases; Applied Statistics"
2;Backend Engineer;Payments platform;Python, PostgreSQL;"CS=Python|Programming|Tech Institute; PostgreSQL|Databases|State University";"Programming; Databases"
"#;

const SAMPLE_VACANCIES_CYRILLIC: &str = r#"ID;Name;Description;KeySkills;SBERT;SBERT_LLM
1;Аналитик данных;Отдел отчётности;SQL, Excel;"CS=SQL|Базы данных|МГУ; Excel|Статистика|ВШЭ";"Базы данных; Прикладная статистика"
2;Инженер-программист;Платёжная платформа;Python;"CS=Python|Программирование|МФТИ";"Программирование"
"#;

const SAMPLE_SUBJECTS: &str = r#"Subject;University
Databases;State University
Statistics;Tech Institute
Programming;Tech Institute
Базы данных;МГУ
Статистика;ВШЭ
Программирование;МФТИ
"#;
