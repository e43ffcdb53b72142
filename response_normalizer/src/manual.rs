/*!

This is the long-form manual for `response_normalizer` and `surveynorm`.

## How answers are classified

Every survey field is processed the same way:

1. The cell is normalized: runs of whitespace become one space, the ends are trimmed.
2. For multi-select fields, the cell is split on the delimiter (a comma by default).
   Empty pieces are dropped. Each remaining piece is a *response unit*.
3. Each unit is classified with the catalog of the field:
   * blank units and units equal to one of the `rejectValues` are rejected,
   * units containing one of the `exclusionKeywords` are rejected,
   * the `rules` are tried in order, the first keyword found in the unit gives its label,
   * the `fallbackKeywords` are tried next and give the `fallbackLabel`,
   * anything else is *unmapped*.

Rejected units are not answers: they are not counted anywhere. Unmapped units
are not counted in the tables either, but they are reported by the audit so
that the catalog can be completed.

Since the first matching rule wins, specific keywords must come before the
general ones. For example, with the rules

```text
[ { "keyword": "haldiram", "label": "Haldiram" },
  { "keyword": "ram",      "label": "Generic Ram" } ]
```

the answer `Haldirams` is classified as `Haldiram`. Swapping the two rules would
classify it as `Generic Ram`.

## Configuration

The program reads a configuration file in JSON. See `demos/godesi_config.json` for a
complete example.

```text
{
  "outputSettings": {
    "surveyName": "GO DESi consumer survey",
    "outputDirectory": "out",
    "topUnmapped": 20,
    "sampleSize": 50
  },
  "sources": [
    { "provider": "xlsx", "filePath": "survey.xlsx", "sheetNameContains": ["master"] }
  ],
  "respondent": {
    "ageColumn": "age",
    "genderColumn": "gender",
    "idColumn": "customer name",
    "screening": [ { "column": "first here about go desi", "invalidValues": ["not responded"] } ]
  },
  "fields": [
    {
      "name": "discovery",
      "column": "how did the customer hear about desi popz",
      "multiselect": true,
      "groupBy": "ageGroup",
      "rejectValues": ["not responded", "not sure"],
      "rules": [ { "keyword": "instagram", "label": "Social Media" } ]
    }
  ]
}
```

`sources`:
 - `provider` (`xlsx` or `csv`)
 - `filePath`, relative to the configuration file
 - `excelWorksheetName` (string, optional): the worksheet to read
 - `sheetNameContains` (array of strings, optional): reads every worksheet whose name
   contains one of these strings. The rows of all the worksheets are concatenated.

When neither worksheet option is provided, the workbook must contain exactly one worksheet.

`respondent`: the columns holding the age group, the gender and (optionally) an
identifier of the respondent. Rows with a blank age group or gender are not counted as
respondents. Each `screening` entry drops the rows whose column is blank or holds one of
the `invalidValues`.

`fields`:
 - `name`: the name of the field in the outputs
 - `column`: the header of the column. Headers are compared after normalization and
   without case. If no header is equal to it, the column whose header contains it is
   used. It is an error if no column or several columns match.
 - `multiselect` (default false), `delimiter` (default `,`)
 - `matchMode`: `substring` (default) or `exact`
 - `groupBy` (optional): `ageGroup` or `gender`, produces a cross tabulation
 - `rejectValues`, `exclusionKeywords`, `rules`, `fallbackKeywords`, `fallbackLabel`
 - `expansions`: `[ { "value": "both", "labels": ["Sweets", "Confectionery and Mints"] } ]`
 - `passThrough` (default false): the answers are counted as they are. A field
   without any rule, reject value, exclusion or fallback is also passed through.

## Outputs

The summary is written in JSON (to the standard output or to the file given with `--out`).
For each field, it contains the count of each label and its percentage. Percentages are
computed over the number of respondents in scope, so multi-select fields may add up to
more than 100% (`exceedsTotal` is then set). Fields without any classified answer have
the status `noData`.

The unmapped answers of each field are written to `unmapped_<field>.csv` in the export
directory.

## Filters

`--age-group` and `--gender` restrict the respondents. They can be repeated. The
classification itself does not depend on the filters.

 */
